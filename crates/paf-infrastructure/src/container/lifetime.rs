//! Registrations and instance lifetimes

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use paf_domain::error::Result;
use paf_domain::value_objects::Instance;

use super::Constructor;

/// How long a resolved instance is reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifetime {
    /// A new instance on every resolution
    #[default]
    Transient,
    /// One instance for the registering container and all its children
    Singleton,
    /// One instance per resolving container
    Hierarchical,
}

/// Converts the constructed concrete instance to the registered capability
pub(crate) type CastFn = dyn Fn(Instance) -> Result<Instance> + Send + Sync;

pub(crate) enum Activator {
    Construct {
        constructor: Constructor,
        cast: Option<Arc<CastFn>>,
    },
    Instance(Instance),
}

pub(crate) struct Registration {
    pub(crate) lifetime: Lifetime,
    pub(crate) activator: Activator,
    /// Filled on first resolution of a singleton
    pub(crate) singleton: OnceCell<Instance>,
}

impl Registration {
    pub(crate) fn new(lifetime: Lifetime, activator: Activator) -> Self {
        Self {
            lifetime,
            activator,
            singleton: OnceCell::new(),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let activator = match &self.activator {
            Activator::Construct { constructor, .. } => constructor.info().signature(),
            Activator::Instance(_) => "instance".to_string(),
        };
        f.debug_struct("Registration")
            .field("lifetime", &self.lifetime)
            .field("activator", &activator)
            .finish()
    }
}
