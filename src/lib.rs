pub mod command;
pub mod config;
pub mod engine;
pub mod serve;
pub mod wire;

pub use config::Config;
pub use engine::Engine;
pub use serve::serve;
