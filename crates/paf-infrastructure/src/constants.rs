//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `paf_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "paf.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "paf";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "PAF";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_NESTING_SEPARATOR: &str = "__";

// ============================================================================
// AUTO-FACTORY CONSTANTS
// ============================================================================

/// Number of distinct factory signatures a provider keeps before evicting
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a `tracing` filter directive
pub const LOG_FILTER_ENV: &str = "PAF_LOG";

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "paf";
