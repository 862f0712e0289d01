//! wire::decoder
//!
//! Reassembly state machine turning arbitrarily chunked byte arrivals into
//! complete frames. Reads may be split at any byte boundary, so the decoder
//! walks a three-state machine: high length byte, low length byte, then
//! payload accumulation.
//!
//! A deadline is armed when the first byte of a frame is consumed while the
//! decoder is empty. If the frame has not completed by the deadline, every
//! buffered partial byte is discarded and the machine resets, so a later,
//! unrelated frame decodes as if the stall never happened.

use bytes::{Buf, BytesMut};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::frame::Frame;

// -----------------------------------------------------------------------------
// ----- FrameDecoder ----------------------------------------------------------

pub struct FrameDecoder {
    buffer: BytesMut,
    state: DecodeState,
    deadline: Option<Instant>,

    timeout: Duration,
    max_frame_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    LengthHigh,
    LengthLow { high: u8 },
    Payload { expected: usize },
}

// -----------------------------------------------------------------------------
// ----- FrameDecoder: Static --------------------------------------------------

impl FrameDecoder {
    pub fn new(timeout: Duration, max_frame_len: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(max_frame_len.min(4096)),
            state: DecodeState::LengthHigh,
            deadline: None,
            timeout,
            max_frame_len,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- FrameDecoder: Public --------------------------------------------------

impl FrameDecoder {
    /// Append one chunk of raw bytes. Expired partials are dropped before the
    /// new bytes land so a stalled frame never poisons a fresh one.
    pub fn feed(&mut self, chunk: &[u8], now: Instant) {
        self.expire(now);
        self.buffer.extend_from_slice(chunk);
    }

    /// Pull the next complete frame, if one is buffered. A single fed chunk
    /// may yield zero, one, or many frames; call until `None`.
    pub fn next(&mut self, now: Instant) -> Option<Frame> {
        loop {
            match self.state {
                DecodeState::LengthHigh => {
                    if self.buffer.is_empty() {
                        return None;
                    }
                    let high = self.buffer.get_u8();
                    // First byte of a new frame starts the reassembly clock.
                    self.deadline = Some(now + self.timeout);
                    self.state = DecodeState::LengthLow { high };
                }

                DecodeState::LengthLow { high } => {
                    if self.buffer.is_empty() {
                        return None;
                    }
                    let low = self.buffer.get_u8();
                    let expected = usize::from(u16::from_be_bytes([high, low]));

                    if expected > self.max_frame_len {
                        warn!(expected, max = self.max_frame_len, "frame length over limit, resetting");
                        self.reset();
                        continue;
                    }

                    if expected == 0 {
                        // Zero-length frame: complete the moment the prefix is in.
                        self.finish_frame();
                        return Some(Frame::new(bytes::Bytes::new()));
                    }

                    self.state = DecodeState::Payload { expected };
                }

                DecodeState::Payload { expected } => {
                    if self.buffer.len() < expected {
                        return None;
                    }
                    let payload = self.buffer.split_to(expected).freeze();
                    self.finish_frame();
                    return Some(Frame::new(payload));
                }
            }
        }
    }

    /// Apply the recovery policy: if a partial frame outlived its deadline,
    /// discard it byte-exactly and return to idle.
    pub fn expire(&mut self, now: Instant) {
        let Some(deadline) = self.deadline else {
            return;
        };

        if now >= deadline {
            debug!(buffered = self.buffer.len(), "reassembly deadline hit, dropping partial frame");
            self.reset();
        }
    }

    /// Deadline of the in-flight partial frame, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

// -----------------------------------------------------------------------------
// ----- FrameDecoder: Private -------------------------------------------------

impl FrameDecoder {
    fn finish_frame(&mut self) {
        self.state = DecodeState::LengthHigh;
        self.deadline = None;
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.state = DecodeState::LengthHigh;
        self.deadline = None;
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
