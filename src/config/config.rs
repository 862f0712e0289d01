use parking_lot::RwLock;
use std::{
    net::SocketAddr,
    path::PathBuf,
    sync::{Arc, OnceLock},
};

use super::cli::CliConfig;
use super::file::FileConfig;
use super::types::{LogLevel, ProtocolConfig};

// -----------------------------------------------------------------------------
// ----- Global Singleton ------------------------------------------------------

static ROOT_CONFIG: OnceLock<Arc<RwLock<Config>>> = OnceLock::new();

// -----------------------------------------------------------------------------
// ----- Config ----------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Config {
    pub device: Option<PathBuf>,
    pub listen_addr: Option<SocketAddr>,
    pub log_level: LogLevel,
    pub protocol: ProtocolConfig,
}

// -----------------------------------------------------------------------------
// ----- Config: Static --------------------------------------------------------

impl Config {
    pub fn init() {
        CliConfig::init();
        Self::load();
    }

    /// Re-read the config file in place; CLI-derived fields are fixed at
    /// startup.
    pub fn reload() {
        Self::load();
    }

    pub fn snapshot() -> Config {
        Self::handle().read().clone()
    }
}

// -----------------------------------------------------------------------------
// ----- Config: Private -------------------------------------------------------

impl Config {
    fn load() {
        let cli = CliConfig::snapshot();
        let file = FileConfig::load(cli.config_file_location.as_deref());

        let next = Config {
            device: cli.device,
            listen_addr: cli.listen_addr,
            log_level: cli.log_level,
            protocol: file.into_protocol(),
        };

        if let Some(handle) = ROOT_CONFIG.get() {
            *handle.write() = next;
        } else {
            let _ = ROOT_CONFIG.set(Arc::new(RwLock::new(next)));
        }
    }

    fn handle() -> Arc<RwLock<Config>> {
        ROOT_CONFIG
            .get()
            .expect("Config not initialized; call Config::init() first")
            .clone()
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
