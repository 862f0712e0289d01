//! command::dispatch
//!
//! Maps a decoded command to its response. The opcode table is fixed at
//! compile time; the protocol has no error frame, so anything the table
//! does not recognize is dropped without a reply.

use tracing::debug;

use super::message::{Command, LedColor, Opcode, Response};

// -----------------------------------------------------------------------------
// ----- LedSink ---------------------------------------------------------------

/// Sink for the `SetLed` side effect. Hosts without an LED plug in `NoLed`.
pub trait LedSink {
    /// Apply the color. Returns false when no LED is available, in which
    /// case the command goes unanswered.
    fn set(&mut self, color: LedColor) -> bool;
}

pub struct NoLed;

impl LedSink for NoLed {
    fn set(&mut self, _color: LedColor) -> bool {
        false
    }
}

// -----------------------------------------------------------------------------
// ----- Dispatcher ------------------------------------------------------------

pub struct Dispatcher {
    led: Box<dyn LedSink + Send>,
}

// -----------------------------------------------------------------------------
// ----- Dispatcher: Static ----------------------------------------------------

impl Dispatcher {
    pub fn new() -> Self {
        Self::with_led_sink(Box::new(NoLed))
    }

    pub fn with_led_sink(led: Box<dyn LedSink + Send>) -> Self {
        Self { led }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// ----- Dispatcher: Public ----------------------------------------------------

impl Dispatcher {
    /// Pure request → response mapping. `None` means silence on the wire.
    pub fn dispatch(&mut self, command: &Command) -> Option<Response> {
        match command.opcode {
            Opcode::Ping => Some(Response {
                opcode: Opcode::Pong,
                success: true,
            }),

            Opcode::SetLed => {
                let color = command.color.unwrap_or_default();
                if !self.led.set(color) {
                    debug!(?color, "led sink unavailable, dropping SetLed");
                    return None;
                }
                Some(Response {
                    opcode: Opcode::SetLed,
                    success: true,
                })
            }

            // A peer's response opcode is not a request.
            Opcode::Pong => {
                debug!("pong received as a request, dropping");
                None
            }
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
