//! Factory construction
//!
//! A [`FactoryBlueprint`] is the analysed signature of one delegate type. It is
//! what the provider caches; binding it to a resolution facility yields the
//! callable handed to users.
//!
//! Because a provider serves exactly one container, a cached blueprint also
//! keeps the callable bound to that container, so repeated requests for one
//! delegate type get the same factory instance.

use std::sync::{Arc, Weak};

use paf_domain::error::{Error, Result};
use paf_domain::ports::{ResolutionFacility, ResolverOverride};
use paf_domain::value_objects::{ErasedFactory, FactorySignature, Instance, TypeKey};
use once_cell::sync::OnceCell;
use tracing::debug;

use super::ParameterByTypeOverride;

/// Builds blueprints for delegate types
///
/// The provider builds through this seam so the build step can be observed.
pub trait BlueprintBuilder: Send + Sync {
    /// Analyse `delegate`, failing if it is not a parameterized factory
    fn build(&self, delegate: TypeKey) -> Result<FactoryBlueprint>;
}

/// Default [`BlueprintBuilder`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FactoryBuilder;

impl FactoryBuilder {
    /// Create a builder
    pub fn new() -> Self {
        Self
    }
}

impl BlueprintBuilder for FactoryBuilder {
    fn build(&self, delegate: TypeKey) -> Result<FactoryBlueprint> {
        let signature = FactorySignature::from_delegate(delegate)?;
        debug!(signature = %signature, "Analysed factory signature");
        Ok(FactoryBlueprint::new(signature))
    }
}

/// Callable-builder for one factory signature
///
/// Holds no strong reference to any container, so caching it never keeps a
/// container alive.
#[derive(Debug)]
pub struct FactoryBlueprint {
    signature: Arc<FactorySignature>,
    /// Callable produced by the first [`bound_to`](Self::bound_to)
    bound: OnceCell<ErasedFactory>,
}

impl FactoryBlueprint {
    /// Wrap an analysed signature
    pub fn new(signature: FactorySignature) -> Self {
        Self {
            signature: Arc::new(signature),
            bound: OnceCell::new(),
        }
    }

    /// The analysed signature
    pub fn signature(&self) -> &FactorySignature {
        &self.signature
    }

    /// Delegate type the blueprint implements
    pub fn delegate(&self) -> TypeKey {
        self.signature.delegate()
    }

    /// Produce a callable resolving through `facility`
    ///
    /// The callable holds the facility weakly; invoking it after the facility
    /// is dropped fails with an infrastructure error. Each call creates fresh
    /// overrides, one per argument in positional order, and asks the facility
    /// for the product.
    pub fn bind<R>(&self, facility: &Arc<R>) -> ErasedFactory
    where
        R: ResolutionFacility + 'static,
    {
        let facility: Weak<R> = Arc::downgrade(facility);
        let facility: Weak<dyn ResolutionFacility> = facility;
        let signature = Arc::clone(&self.signature);

        ErasedFactory::new(signature.delegate(), move |arguments: Vec<Instance>| {
            let facility = facility.upgrade().ok_or_else(|| {
                Error::infrastructure(format!(
                    "Factory {} outlived the container that created it",
                    signature.delegate()
                ))
            })?;

            let product = signature.product();
            let overrides = signature
                .arguments()
                .iter()
                .zip(arguments)
                .map(|(&parameter, value)| {
                    Box::new(ParameterByTypeOverride::new(product, parameter, value))
                        as Box<dyn ResolverOverride>
                })
                .collect::<Vec<_>>();

            facility.resolve_with(product, &overrides)
        })
    }

    /// Callable for the facility owning this blueprint, bound on first use
    ///
    /// Later calls return the same callable whatever facility they pass; a
    /// blueprint cached by a provider only ever serves one container.
    pub fn bound_to<R>(&self, facility: &Arc<R>) -> ErasedFactory
    where
        R: ResolutionFacility + 'static,
    {
        self.bound.get_or_init(|| self.bind(facility)).clone()
    }
}
