use clap::Parser;
use parking_lot::RwLock;
use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use super::types::LogLevel;

// -----------------------------------------------------------------------------
// ----- Global Singleton ------------------------------------------------------

static CLI_CONFIG: OnceLock<Arc<RwLock<CliConfig>>> = OnceLock::new();

// -----------------------------------------------------------------------------
// ----- CliConfig -------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct CliConfig {
    pub device: Option<PathBuf>,
    pub listen_addr: Option<SocketAddr>,
    pub config_file_location: Option<PathBuf>,
    pub log_level: LogLevel,
}

impl CliConfig {
    pub fn init() {
        CLI_CONFIG.get_or_init(|| {
            let cfg = Self::from_args();
            cfg.validate();
            Arc::new(RwLock::new(cfg))
        });
    }

    pub fn snapshot() -> CliConfig {
        handle().read().clone()
    }
}

// -----------------------------------------------------------------------------
// ----- CliConfig: Private ----------------------------------------------------

impl CliConfig {
    fn from_args() -> Self {
        let args = Args::try_parse().unwrap_or_else(|e| panic!("Invalid CLI/ENV: {e}"));

        Self {
            device: args.device,
            listen_addr: args.listen,
            config_file_location: args.config_file,
            log_level: args.log_level,
        }
    }

    fn validate(&self) {
        match (&self.device, &self.listen_addr) {
            (None, None) => panic!("one of --device or --listen is required"),
            (Some(_), Some(_)) => panic!("--device and --listen are mutually exclusive"),
            _ => {}
        }

        if let Some(device) = &self.device {
            must_exist(device, "--device");
        }

        if let Some(config) = &self.config_file_location {
            must_exist(config, "--config / wirecrab.toml");
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Args ------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "wirecrab", version, about = "Framed serial request/response engine")]
struct Args {
    // Serial device node to serve, already configured by the harness
    // (e.g. /dev/ttyACM0). Mutually exclusive with --listen.
    #[arg(long = "device", short = 'd', env = "WIRECRAB_DEVICE")]
    device: Option<PathBuf>,

    // TCP listen address for bench/HIL runs without hardware.
    #[arg(long = "listen", short = 'l', env = "WIRECRAB_LISTEN")]
    listen: Option<SocketAddr>,

    // Not required via CLI or ENV (defaults to info).
    #[arg(long = "log", default_value = "info")]
    log_level: LogLevel,

    // Optional; every key has a default.
    #[arg(long = "config", env = "WIRECRAB_CONFIG_FILE")]
    config_file: Option<PathBuf>,
}

// -----------------------------------------------------------------------------
// ----- Private Utils ---------------------------------------------------------

fn handle() -> Arc<RwLock<CliConfig>> {
    CLI_CONFIG
        .get()
        .expect("config not initialized; call Config::init() first")
        .clone()
}

fn must_exist(path: &Path, hint: &str) {
    if fs::metadata(path).is_err() {
        panic!("required path missing: {} (from {hint})", path.display());
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
