//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{AutoFactoryConfig, LoggingConfig};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Auto-factory settings
    #[serde(default)]
    pub auto_factory: AutoFactoryConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}
