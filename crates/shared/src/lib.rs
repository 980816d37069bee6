pub mod agent;
pub mod api;
pub mod config;
pub mod utils;

pub use config::{AgentConfig, ConfigError, Variant};
