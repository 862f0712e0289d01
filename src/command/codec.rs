//! command::codec
//!
//! Varint field codec for frame payloads. Each field is a varint key
//! (`field_number << 3 | wire_type`) followed by a type-specific value.
//! Only varint-typed fields are meaningful to this engine; unknown fields
//! are skipped by wire type so newer peers can extend payloads without
//! breaking the framing contract.

use bytes::{BufMut, Bytes, BytesMut};
use thiserror::Error;

use super::message::{Command, LedColor, Opcode, Response, WireRevision};

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

const FIELD_OPCODE: u64 = 1;
const FIELD_SUCCESS: u64 = 2;
const FIELD_COLOR: u64 = 3;

const WIRE_VARINT: u64 = 0;
const WIRE_FIXED64: u64 = 1;
const WIRE_LENGTH_DELIMITED: u64 = 2;
const WIRE_FIXED32: u64 = 5;

const VARINT_MAX_BYTES: usize = 10;

// -----------------------------------------------------------------------------
// ----- CommandError ----------------------------------------------------------

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("payload ended inside a field")]
    Truncated,

    #[error("varint longer than {VARINT_MAX_BYTES} bytes")]
    MalformedVarint,

    #[error("unsupported wire type {0}")]
    UnsupportedWireType(u64),

    #[error("unrecognized opcode {0}")]
    UnknownOpcode(u64),

    #[error("unrecognized led color {0}")]
    UnknownColor(u64),

    #[error("payload carries no opcode")]
    MissingOpcode,
}

// -----------------------------------------------------------------------------
// ----- Command: Decode -------------------------------------------------------

impl Command {
    pub fn decode(mut payload: &[u8]) -> Result<Self, CommandError> {
        let mut opcode = None;
        let mut color = None;

        while !payload.is_empty() {
            let key = read_varint(&mut payload)?;
            let field = key >> 3;
            let wire_type = key & 0x07;

            match (field, wire_type) {
                (FIELD_OPCODE, WIRE_VARINT) => {
                    let raw = read_varint(&mut payload)?;
                    opcode = Some(Opcode::from_u64(raw).ok_or(CommandError::UnknownOpcode(raw))?);
                }

                (FIELD_COLOR, WIRE_VARINT) => {
                    let raw = read_varint(&mut payload)?;
                    color = Some(LedColor::from_u64(raw).ok_or(CommandError::UnknownColor(raw))?);
                }

                _ => skip_field(&mut payload, wire_type)?,
            }
        }

        Ok(Command {
            opcode: opcode.ok_or(CommandError::MissingOpcode)?,
            color,
        })
    }

    /// Wire payload for this command. Zero-valued fields are omitted.
    pub fn encode(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(8);
        put_varint_field(&mut out, FIELD_OPCODE, self.opcode as u64);
        if let Some(color) = self.color {
            if color != LedColor::Off {
                put_varint_field(&mut out, FIELD_COLOR, color as u64);
            }
        }
        out.freeze()
    }
}

// -----------------------------------------------------------------------------
// ----- Response: Encode ------------------------------------------------------

impl Response {
    /// Wire payload for this response under the active revision. v1 carries
    /// the opcode alone; v2 adds the success flag, omitted when false.
    pub fn encode(&self, revision: WireRevision) -> Bytes {
        let mut out = BytesMut::with_capacity(4);
        put_varint_field(&mut out, FIELD_OPCODE, self.opcode as u64);

        if revision == WireRevision::V2 && self.success {
            put_varint_field(&mut out, FIELD_SUCCESS, 1);
        }

        out.freeze()
    }
}

// -----------------------------------------------------------------------------
// ----- Varint Primitives -----------------------------------------------------

fn read_varint(buf: &mut &[u8]) -> Result<u64, CommandError> {
    let mut value: u64 = 0;

    for i in 0..VARINT_MAX_BYTES {
        let Some((&byte, rest)) = buf.split_first() else {
            return Err(CommandError::Truncated);
        };
        *buf = rest;

        value |= u64::from(byte & 0x7F) << (i * 7);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }

    Err(CommandError::MalformedVarint)
}

fn skip_field(buf: &mut &[u8], wire_type: u64) -> Result<(), CommandError> {
    match wire_type {
        WIRE_VARINT => {
            read_varint(buf)?;
        }
        WIRE_FIXED64 => advance(buf, 8)?,
        WIRE_LENGTH_DELIMITED => {
            let len = read_varint(buf)?;
            let len = usize::try_from(len).map_err(|_| CommandError::Truncated)?;
            advance(buf, len)?;
        }
        WIRE_FIXED32 => advance(buf, 4)?,
        other => return Err(CommandError::UnsupportedWireType(other)),
    }

    Ok(())
}

fn advance(buf: &mut &[u8], n: usize) -> Result<(), CommandError> {
    if buf.len() < n {
        return Err(CommandError::Truncated);
    }
    *buf = &buf[n..];
    Ok(())
}

fn put_varint_field(out: &mut BytesMut, field: u64, value: u64) {
    put_varint(out, field << 3 | WIRE_VARINT);
    put_varint(out, value);
}

fn put_varint(out: &mut BytesMut, mut value: u64) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.put_u8(byte);
            break;
        }
        out.put_u8(byte | 0x80);
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
