//! Loss recovery: a stalled partial frame must be discarded on deadline and
//! must not poison a later, unrelated frame.

mod support;

use std::time::Duration;
use tokio::io::AsyncWriteExt;

use support::*;
use wirecrab::Engine;
use wirecrab::command::WireRevision;
use wirecrab::config::ProtocolConfig;

const READ_WINDOW: Duration = Duration::from_secs(1);

#[tokio::test(start_paused = true)]
async fn stalled_partial_times_out_then_fresh_ping_pongs() {
    let engine = Engine::new(&protocol(WireRevision::V1));
    let mut port = spawn_engine(engine);

    // Two of the four ping bytes, then silence.
    port.write_all(&PING[..2]).await.unwrap();

    let resp = read_within(&mut port, 16, READ_WINDOW).await;
    assert!(resp.is_empty(), "partial frame must not be answered");

    // The 500ms deadline has passed inside the read window; this ping is a
    // fresh frame, not a continuation.
    port.write_all(PING).await.unwrap();

    let resp = read_exact(&mut port, PONG_V1.len()).await;
    assert_eq!(resp, PONG_V1);
}

#[tokio::test(start_paused = true)]
async fn unknown_opcode_is_silently_dropped() {
    let engine = Engine::new(&protocol(WireRevision::V2));
    let mut port = spawn_engine(engine);

    port.write_all(&[0x00, 0x02, 0x08, 0x63]).await.unwrap();

    let resp = read_within(&mut port, 16, READ_WINDOW).await;
    assert!(resp.is_empty(), "unknown opcode must not be answered");

    // The engine is still alive afterwards.
    port.write_all(PING).await.unwrap();
    let resp = read_exact(&mut port, PONG_V2.len()).await;
    assert_eq!(resp, PONG_V2);
}

#[tokio::test(start_paused = true)]
async fn zero_length_frame_is_silent() {
    let engine = Engine::new(&protocol(WireRevision::V2));
    let mut port = spawn_engine(engine);

    port.write_all(&[0x00, 0x00]).await.unwrap();

    let resp = read_within(&mut port, 16, READ_WINDOW).await;
    assert!(resp.is_empty());

    port.write_all(PING).await.unwrap();
    let resp = read_exact(&mut port, PONG_V2.len()).await;
    assert_eq!(resp, PONG_V2);
}

#[tokio::test(start_paused = true)]
async fn oversized_length_prefix_recovers() {
    let engine = Engine::new(&ProtocolConfig {
        revision: WireRevision::V1,
        max_frame_len: 16,
        ..ProtocolConfig::default()
    });
    let mut port = spawn_engine(engine);

    // Announces a 65535-byte payload; over the limit, dropped on sight.
    port.write_all(&[0xFF, 0xFF]).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    port.write_all(PING).await.unwrap();
    let resp = read_exact(&mut port, PONG_V1.len()).await;
    assert_eq!(resp, PONG_V1);
}

#[tokio::test(start_paused = true)]
async fn short_reassembly_timeout_is_honored() {
    let engine = Engine::new(&ProtocolConfig {
        revision: WireRevision::V1,
        reassembly_timeout: Duration::from_millis(100),
        ..ProtocolConfig::default()
    });
    let mut port = spawn_engine(engine);

    port.write_all(&PING[..2]).await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;

    port.write_all(PING).await.unwrap();
    let resp = read_exact(&mut port, PONG_V1.len()).await;
    assert_eq!(resp, PONG_V1);
}
