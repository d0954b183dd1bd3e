//! Configuration management
//!
//! Layered configuration: compiled defaults, an optional TOML file, then
//! `PAF_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, AutoFactoryConfig, LoggingConfig};
