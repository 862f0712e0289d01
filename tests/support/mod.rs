use std::time::Duration;
use tokio::io::{AsyncReadExt, DuplexStream};

use wirecrab::command::WireRevision;
use wirecrab::config::ProtocolConfig;
use wirecrab::{Engine, serve};

// Observed HIL vectors.
pub const PING: &[u8] = &[0x00, 0x02, 0x08, 0x01];
#[allow(dead_code)]
pub const PONG_V1: &[u8] = &[0x00, 0x02, 0x08, 0x02];
#[allow(dead_code)]
pub const PONG_V2: &[u8] = &[0x00, 0x04, 0x08, 0x02, 0x10, 0x01];

#[allow(dead_code)]
pub fn protocol(revision: WireRevision) -> ProtocolConfig {
    ProtocolConfig {
        revision,
        ..ProtocolConfig::default()
    }
}

/// Spawn an engine behind an in-memory pipe. The returned stream is the
/// test's end of the serial line.
pub fn spawn_engine(engine: Engine) -> DuplexStream {
    let (port, device) = tokio::io::duplex(256);

    tokio::spawn(async move {
        let _ = serve(device, engine).await;
    });

    port
}

/// Read exactly `n` response bytes.
#[allow(dead_code)]
pub async fn read_exact(port: &mut DuplexStream, n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n];
    port.read_exact(&mut buf).await.expect("response bytes");
    buf
}

/// Serial-style read with a timeout: whatever arrived within the window,
/// possibly nothing.
#[allow(dead_code)]
pub async fn read_within(port: &mut DuplexStream, max: usize, window: Duration) -> Vec<u8> {
    let mut buf = vec![0u8; max];
    match tokio::time::timeout(window, port.read(&mut buf)).await {
        Ok(Ok(n)) => {
            buf.truncate(n);
            buf
        }
        Ok(Err(_)) | Err(_) => Vec::new(),
    }
}
