use std::time::Duration;

use crate::command::WireRevision;

// -------------------------------------------------------------------------------------------------
// ---- LogLevel -----------------------------------------------------------------------------------

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

// -------------------------------------------------------------------------------------------------
// ---- ProtocolConfig -----------------------------------------------------------------------------

/// Knobs of the frame engine itself, as opposed to how the process is wired
/// to the outside world.
#[derive(Clone, Debug)]
pub struct ProtocolConfig {
    pub revision: WireRevision,

    /// How long a partial frame may sit in the reassembly buffer before it
    /// is discarded.
    pub reassembly_timeout: Duration,

    /// Frames announcing a longer payload are discarded like truncated ones.
    pub max_frame_len: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            revision: WireRevision::default(),
            reassembly_timeout: Duration::from_millis(500),
            max_frame_len: 1024,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// -------------------------------------------------------------------------------------------------
