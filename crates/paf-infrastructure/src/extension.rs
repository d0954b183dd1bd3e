//! Auto-factory container extension
//!
//! Installs a build strategy that answers requests for parameterized delegate
//! types (`fn(Arc<A>, ...) -> Arc<P>`) with generated factories, unless the
//! delegate type was configured explicitly.
//!
//! Every container the extension initializes, including children created
//! later, gets its own [`FactoryProvider`] and therefore its own cache.

use std::sync::Arc;

use paf_domain::error::Result;
use paf_domain::value_objects::{Instance, TypeKey};
use tracing::info;

use crate::config::AutoFactoryConfig;
use crate::container::{BuildStrategy, Container, ContainerExtension};
use crate::factory::{BlueprintBuilder, FactoryBuilder, FactoryProvider};

/// Enables parameterized auto-factories on a container
///
/// ```ignore
/// let container = Container::new();
/// container.add_extension(AutoFactoryExtension::default())?;
/// let create = container.resolve_factory::<fn(Arc<Config>) -> Arc<Service>>()?;
/// ```
#[derive(Clone)]
pub struct AutoFactoryExtension {
    cache_capacity: usize,
    builder: Arc<dyn BlueprintBuilder>,
}

impl AutoFactoryExtension {
    /// Create the extension from configuration
    pub fn new(config: &AutoFactoryConfig) -> Result<Self> {
        Self::with_builder(config, Arc::new(FactoryBuilder::new()))
    }

    /// Create the extension building blueprints through `builder`
    pub fn with_builder(
        config: &AutoFactoryConfig,
        builder: Arc<dyn BlueprintBuilder>,
    ) -> Result<Self> {
        // Fail at construction rather than at installation
        FactoryProvider::with_builder(config.cache_capacity, Arc::clone(&builder))?;
        Ok(Self {
            cache_capacity: config.cache_capacity,
            builder,
        })
    }
}

impl Default for AutoFactoryExtension {
    fn default() -> Self {
        Self {
            cache_capacity: AutoFactoryConfig::default().cache_capacity,
            builder: Arc::new(FactoryBuilder::new()),
        }
    }
}

impl ContainerExtension for AutoFactoryExtension {
    fn initialize(&self, container: &Container) -> Result<()> {
        let provider = FactoryProvider::with_builder(self.cache_capacity, Arc::clone(&self.builder))?;
        container.add_strategy(Arc::new(AutoFactoryStrategy::new(provider)));
        info!(
            cache_capacity = self.cache_capacity,
            "Auto-factory extension installed"
        );
        Ok(())
    }
}

/// Build strategy serving parameterized delegate types
pub struct AutoFactoryStrategy {
    provider: FactoryProvider,
}

impl AutoFactoryStrategy {
    /// Wrap a provider
    pub fn new(provider: FactoryProvider) -> Self {
        Self { provider }
    }

    /// The provider owned by this strategy
    pub fn provider(&self) -> &FactoryProvider {
        &self.provider
    }
}

impl BuildStrategy for AutoFactoryStrategy {
    fn pre_build(&self, container: &Container, requested: TypeKey) -> Result<Option<Instance>> {
        let blueprint = self
            .provider
            .try_get_or_create(requested, || container.is_registered(requested))?;

        Ok(blueprint.map(|blueprint| container.bind_factory(&blueprint).into_instance()))
    }
}
