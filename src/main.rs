use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use wirecrab::{Config, Engine, serve};

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

const APP_NAME: &str = "🦀 wirecrab";

// -----------------------------------------------------------------------------
// ----- Main ------------------------------------------------------------------

#[tokio::main]
async fn main() -> std::io::Result<()> {
    setup();
    run_forever().await
}

// -----------------------------------------------------------------------------
// ----- Setup -----------------------------------------------------------------

fn setup() {
    // This has to be the first thing we do, because it initializes the config
    Config::init();

    init_tracing();
}

fn init_tracing() {
    let config = Config::snapshot();
    let filter = EnvFilter::try_new(config.log_level.as_str()).unwrap();
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

// -----------------------------------------------------------------------------
// ----- Run -------------------------------------------------------------------

async fn run_forever() -> std::io::Result<()> {
    let config = Config::snapshot();

    match &config.device {
        Some(device) => run_device(device.clone(), &config).await,
        None => run_listener(&config).await,
    }
}

/// Serve the serial device node until EOF or ctrl-c. The node is assumed to
/// be configured by whoever attached it (baud rate, raw mode).
async fn run_device(device: std::path::PathBuf, config: &Config) -> std::io::Result<()> {
    let port = tokio::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(&device)
        .await?;

    info!("{} serving {}", APP_NAME, device.display());

    let engine = Engine::new(&config.protocol);

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("{} shutting down", APP_NAME);
            Ok(())
        }
        serve_res = serve(port, engine) => serve_res,
    }
}

/// Bench/HIL mode: accept TCP connections and run one engine per peer.
async fn run_listener(config: &Config) -> std::io::Result<()> {
    let addr = config.listen_addr.expect("listen mode requires --listen");
    let listener = TcpListener::bind(addr).await?;

    info!("{} listening on {}", APP_NAME, addr);

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("{} shutting down", APP_NAME);
                break;
            }

            accept_res = listener.accept() => {
                let (stream, peer) = match accept_res {
                    Ok(v) => v,
                    Err(e) => { error!("accept error: {e}"); continue; }
                };

                let _ = stream.set_nodelay(true);
                let engine = Engine::new(&Config::snapshot().protocol);

                tokio::spawn(async move {
                    if let Err(e) = serve(stream, engine).await {
                        error!("peer {peer} error: {e}");
                    }
                });
            }
        }
    }

    Ok(())
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
