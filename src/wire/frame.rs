//! wire::frame
//!
//! The unit of communication on the serial link: a self-describing,
//! length-prefixed run of payload bytes.
//!
//! ```text
//! Frame ::= length:u16be payload:u8[length]
//! ```
//!
//! No delimiter, no checksum. The length prefix counts only the bytes that
//! follow it, so a zero-length frame is two zero bytes on the wire.

use bytes::{BufMut, Bytes, BytesMut};
use thiserror::Error;

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

/// Hard ceiling imposed by the two-byte length prefix.
pub const WIRE_MAX_PAYLOAD: usize = u16::MAX as usize;

/// Length prefix size on the wire.
pub const LENGTH_PREFIX_SIZE: usize = 2;

// -----------------------------------------------------------------------------
// ----- Frame -----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    payload: Bytes,
}

// -----------------------------------------------------------------------------
// ----- Frame: Static ---------------------------------------------------------

impl Frame {
    pub fn new(payload: Bytes) -> Self {
        Self { payload }
    }

    pub fn from_static(payload: &'static [u8]) -> Self {
        Self {
            payload: Bytes::from_static(payload),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Frame: Public ---------------------------------------------------------

impl Frame {
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Append the wire rendition (length prefix + payload) to `out`.
    pub fn write_to(&self, out: &mut BytesMut) -> Result<(), EncodeError> {
        let len = self.payload.len();
        if len > WIRE_MAX_PAYLOAD {
            return Err(EncodeError::PayloadTooLarge(len));
        }

        out.reserve(LENGTH_PREFIX_SIZE + len);
        out.put_u16(len as u16);
        out.extend_from_slice(&self.payload);

        Ok(())
    }

    /// Complete wire buffer for this frame.
    pub fn to_bytes(&self) -> Result<Bytes, EncodeError> {
        let mut out = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + self.payload.len());
        self.write_to(&mut out)?;
        Ok(out.freeze())
    }
}

// -----------------------------------------------------------------------------
// ----- EncodeError -----------------------------------------------------------

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("payload of {0} bytes exceeds the u16 length prefix")]
    PayloadTooLarge(usize),
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
