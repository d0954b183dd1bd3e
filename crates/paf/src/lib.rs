//! # Parameterized Auto-Factories
//!
//! Ask a container for a delegate type such as `fn(Arc<Color>) -> Arc<Car>`
//! and get back a factory that builds `Car` with the given `Color` wired into
//! its constructor, while every other dependency is resolved by the container.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use paf::infrastructure::container::Lifetime;
//!
//! let container = paf::init(None)?;
//! container.register_type::<Car>(Lifetime::Transient);
//!
//! let paint_car = container.resolve_factory::<fn(Arc<Color>) -> Arc<Car>>()?;
//! let car = paint_car.invoke((Arc::new(Color::red()),))?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - type descriptors, delegate signatures, errors and ports
//! - `infrastructure` - eviction cache, factory provider, container, config, logging

use std::path::Path;

/// Domain layer - type descriptors, signatures and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use paf_domain::*;
}

/// Infrastructure layer - container, factories, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use paf_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use infrastructure::config::{AppConfig, AutoFactoryConfig, ConfigLoader, LoggingConfig};
pub use infrastructure::container::{Container, Injectable, Lifetime};
pub use infrastructure::AutoFactoryExtension;

/// Load configuration from `path` (or the default locations) and `PAF_` variables
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let loader = match path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}

/// Load configuration, install the global logger and build the root container
///
/// Fails if a global `tracing` subscriber is already installed; use
/// [`load_config`] with [`container_from_config`] to keep an existing one.
pub fn init(path: Option<&Path>) -> Result<Container> {
    let config = load_config(path)?;
    infrastructure::logging::init_logging(&config.logging)?;
    container_from_config(&config)
}

/// Create a root container with auto-factories enabled
pub fn container_from_config(config: &AppConfig) -> Result<Container> {
    let container = Container::new();
    container.add_extension(AutoFactoryExtension::new(&config.auto_factory)?)?;
    tracing::debug!(
        cache_capacity = config.auto_factory.cache_capacity,
        "Container ready"
    );
    Ok(container)
}
