//! serve
//!
//! Async runner binding an [`Engine`] to a raw byte transport. Anything
//! `AsyncRead + AsyncWrite` works: a serial device node, a TCP stream, or an
//! in-memory duplex in tests. The loop reads whatever chunk the transport
//! hands over, feeds it to the engine, and writes the responses back
//! fire-and-forget; a timer branch fires the reassembly deadline when the
//! line goes quiet mid-frame.

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{Instant, sleep_until};
use tracing::trace;

use crate::engine::Engine;

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

const SCRATCH_CAPACITY_HINT: usize = 4096;

// -----------------------------------------------------------------------------
// ----- serve -----------------------------------------------------------------

/// Drive `engine` over `io` until the transport reports EOF.
pub async fn serve<S>(io: S, mut engine: Engine) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (mut reader, mut writer) = tokio::io::split(io);
    let mut scratch = BytesMut::with_capacity(SCRATCH_CAPACITY_HINT);

    loop {
        let deadline = engine.next_deadline();

        tokio::select! {

            // -- Raw bytes off the line --
            read_res = async {
                scratch.reserve(SCRATCH_CAPACITY_HINT);
                reader.read_buf(&mut scratch).await
            } => {
                let n = read_res?;
                if n == 0 { break; }

                trace!(n, "chunk received");

                let mut outbox = engine.ingest(&scratch, Instant::now());
                scratch.clear();

                if !outbox.is_empty() {
                    writer.write_all_buf(&mut outbox).await?;
                    writer.flush().await?;
                }
            }

            // -- Reassembly deadline on a stalled partial frame --
            _ = maybe_sleep(deadline), if deadline.is_some() => {
                engine.expire(Instant::now());
            }
        }
    }

    Ok(())
}

async fn maybe_sleep(deadline: Option<Instant>) {
    if let Some(deadline) = deadline {
        sleep_until(deadline).await;
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
