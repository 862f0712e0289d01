//! Ping/pong exchanges over an in-memory serial line, matching the
//! hardware-in-the-loop byte vectors.

mod support;

use std::time::Duration;
use tokio::io::AsyncWriteExt;

use support::*;
use wirecrab::Engine;
use wirecrab::command::WireRevision;

#[tokio::test(start_paused = true)]
async fn ping_should_pong() {
    let engine = Engine::new(&protocol(WireRevision::V2));
    let mut port = spawn_engine(engine);

    port.write_all(PING).await.unwrap();

    let resp = read_exact(&mut port, PONG_V2.len()).await;
    assert_eq!(resp, PONG_V2);
}

#[tokio::test(start_paused = true)]
async fn ping_should_pong_v1() {
    let engine = Engine::new(&protocol(WireRevision::V1));
    let mut port = spawn_engine(engine);

    port.write_all(PING).await.unwrap();

    let resp = read_exact(&mut port, PONG_V1.len()).await;
    assert_eq!(resp, PONG_V1);
}

#[tokio::test(start_paused = true)]
async fn split_ping_reassembles() {
    let engine = Engine::new(&protocol(WireRevision::V1));
    let mut port = spawn_engine(engine);

    port.write_all(&PING[..2]).await.unwrap();
    port.flush().await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    port.write_all(&PING[2..]).await.unwrap();

    let resp = read_exact(&mut port, PONG_V1.len()).await;
    assert_eq!(resp, PONG_V1);
}

#[tokio::test(start_paused = true)]
async fn byte_at_a_time_ping_reassembles() {
    let engine = Engine::new(&protocol(WireRevision::V2));
    let mut port = spawn_engine(engine);

    for &b in PING {
        port.write_all(&[b]).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    let resp = read_exact(&mut port, PONG_V2.len()).await;
    assert_eq!(resp, PONG_V2);
}

#[tokio::test(start_paused = true)]
async fn two_pings_in_one_write_pong_twice() {
    let engine = Engine::new(&protocol(WireRevision::V1));
    let mut port = spawn_engine(engine);

    let mut wire = Vec::new();
    wire.extend_from_slice(PING);
    wire.extend_from_slice(PING);
    port.write_all(&wire).await.unwrap();

    let resp = read_exact(&mut port, PONG_V1.len() * 2).await;
    assert_eq!(&resp[..PONG_V1.len()], PONG_V1);
    assert_eq!(&resp[PONG_V1.len()..], PONG_V1);
}
