//! Container extension points

use paf_domain::error::Result;
use paf_domain::value_objects::{Instance, TypeKey};

use super::Container;

/// Consulted before the container's own registrations
pub trait BuildStrategy: Send + Sync {
    /// Produce `requested` for `container`, `None` to fall through
    fn pre_build(&self, container: &Container, requested: TypeKey) -> Result<Option<Instance>>;
}

/// Installs strategies (or registrations) into a container
pub trait ContainerExtension: Send + Sync {
    /// Called by [`Container::add_extension`], then once for every child
    /// container created afterwards
    fn initialize(&self, container: &Container) -> Result<()>;
}
