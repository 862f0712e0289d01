//! config::file
//!
//! Optional TOML file holding the protocol knobs. Every key has a default,
//! so a missing file (or an empty one) yields the stock engine: v2 wire
//! revision, 500ms reassembly timeout, 1024-byte frames.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::command::WireRevision;
use crate::wire::frame::WIRE_MAX_PAYLOAD;

use super::types::ProtocolConfig;

// -----------------------------------------------------------------------------
// ----- FileConfig ------------------------------------------------------------

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub protocol: Option<String>,
    pub reassembly_timeout: Option<String>,
    pub max_frame_len: Option<usize>,
}

// -----------------------------------------------------------------------------
// ----- FileConfig: Public ----------------------------------------------------

impl FileConfig {
    /// Config startup is the one place where dying loudly beats limping on,
    /// so malformed files panic.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        let raw = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));

        toml::from_str(&raw).unwrap_or_else(|e| panic!("invalid {}: {e}", path.display()))
    }

    pub fn into_protocol(self) -> ProtocolConfig {
        let defaults = ProtocolConfig::default();

        let revision = match self.protocol.as_deref() {
            None => defaults.revision,
            Some("v1") => WireRevision::V1,
            Some("v2") => WireRevision::V2,
            Some(other) => panic!("unknown protocol revision {other:?} (expected \"v1\" or \"v2\")"),
        };

        let reassembly_timeout = match self.reassembly_timeout.as_deref() {
            None => defaults.reassembly_timeout,
            Some(raw) => humantime::parse_duration(raw)
                .unwrap_or_else(|e| panic!("invalid reassembly_timeout {raw:?}: {e}")),
        };

        let max_frame_len = self.max_frame_len.unwrap_or(defaults.max_frame_len);
        if max_frame_len == 0 || max_frame_len > WIRE_MAX_PAYLOAD {
            panic!("max_frame_len must be between 1 and {WIRE_MAX_PAYLOAD}");
        }

        ProtocolConfig {
            revision,
            reassembly_timeout,
            max_frame_len,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
