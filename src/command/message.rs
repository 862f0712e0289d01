//! command::message
//!
//! Typed view of a frame payload. Requests carry an opcode plus optional
//! arguments; responses echo an opcode and a success flag.

// -----------------------------------------------------------------------------
// ----- Opcode ----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Ping = 1,
    Pong = 2,
    SetLed = 3,
}

impl Opcode {
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            1 => Some(Opcode::Ping),
            2 => Some(Opcode::Pong),
            3 => Some(Opcode::SetLed),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- LedColor --------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LedColor {
    #[default]
    Off = 0,
    White = 1,
}

impl LedColor {
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            0 => Some(LedColor::Off),
            1 => Some(LedColor::White),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- WireRevision ----------------------------------------------------------

/// Shape of the response payload on the wire.
///
/// v1 firmware answered PING with a bare opcode (`08 02`); v2 appends the
/// success flag (`08 02 10 01`). Nothing on the wire distinguishes the two,
/// so the active revision is configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireRevision {
    V1,
    #[default]
    V2,
}

// -----------------------------------------------------------------------------
// ----- Command / Response ----------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub opcode: Opcode,
    /// Argument of `SetLed`; absent means `Off` (zero-valued fields are
    /// omitted on the wire).
    pub color: Option<LedColor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub opcode: Opcode,
    pub success: bool,
}

impl Command {
    pub fn ping() -> Self {
        Self {
            opcode: Opcode::Ping,
            color: None,
        }
    }

    pub fn set_led(color: LedColor) -> Self {
        Self {
            opcode: Opcode::SetLed,
            color: Some(color),
        }
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
