//! engine
//!
//! The decode → dispatch → encode pipeline, sans-io. The caller owns the
//! clock and the transport: it feeds raw chunks in with `ingest`, writes the
//! returned bytes out, and fires `expire` when the line goes quiet past
//! `next_deadline`. Frames are processed strictly in arrival order against a
//! single reassembly buffer.

use bytes::BytesMut;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::command::{Command, Dispatcher, LedSink, WireRevision};
use crate::config::ProtocolConfig;
use crate::wire::{Frame, FrameDecoder};

// -----------------------------------------------------------------------------
// ----- Engine ----------------------------------------------------------------

pub struct Engine {
    decoder: FrameDecoder,
    dispatcher: Dispatcher,
    revision: WireRevision,
}

// -----------------------------------------------------------------------------
// ----- Engine: Static --------------------------------------------------------

impl Engine {
    pub fn new(protocol: &ProtocolConfig) -> Self {
        Self::with_dispatcher(protocol, Dispatcher::new())
    }

    pub fn with_led_sink(protocol: &ProtocolConfig, led: Box<dyn LedSink + Send>) -> Self {
        Self::with_dispatcher(protocol, Dispatcher::with_led_sink(led))
    }

    fn with_dispatcher(protocol: &ProtocolConfig, dispatcher: Dispatcher) -> Self {
        Self {
            decoder: FrameDecoder::new(protocol.reassembly_timeout, protocol.max_frame_len),
            dispatcher,
            revision: protocol.revision,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Engine: Public --------------------------------------------------------

impl Engine {
    /// Feed one chunk of raw bytes and return the concatenated wire bytes of
    /// every response it produced. Empty output means no frame completed or
    /// nothing answered.
    pub fn ingest(&mut self, chunk: &[u8], now: Instant) -> BytesMut {
        self.decoder.feed(chunk, now);

        let mut outbox = BytesMut::new();
        while let Some(frame) = self.decoder.next(now) {
            self.process_frame(&frame, &mut outbox);
        }

        outbox
    }

    /// Apply the recovery policy when no bytes arrive.
    pub fn expire(&mut self, now: Instant) {
        self.decoder.expire(now);
    }

    /// Deadline by which the in-flight partial frame must complete, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.decoder.next_deadline()
    }
}

// -----------------------------------------------------------------------------
// ----- Engine: Private -------------------------------------------------------

impl Engine {
    fn process_frame(&mut self, frame: &Frame, outbox: &mut BytesMut) {
        let command = match Command::decode(frame.payload()) {
            Ok(command) => command,
            Err(e) => {
                debug!(error = %e, len = frame.len(), "undecodable payload, dropping frame");
                return;
            }
        };

        let Some(response) = self.dispatcher.dispatch(&command) else {
            return;
        };

        let reply = Frame::new(response.encode(self.revision));
        if let Err(e) = reply.write_to(outbox) {
            // Responses are a handful of bytes; this is unreachable unless a
            // handler grows past the u16 prefix.
            warn!(error = %e, "response frame does not fit the wire, dropping");
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
