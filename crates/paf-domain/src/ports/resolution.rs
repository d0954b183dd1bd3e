//! Resolution Facility Port
//!
//! Defines what the factory core needs from the container that hosts it.

use std::fmt;

use crate::error::Result;
use crate::value_objects::{ConstructorInfo, Instance, TypeKey};

/// Capability (interface) satisfaction query
pub trait CapabilityQuery {
    /// Whether `concrete` is registered as an implementation of `capability`
    fn implements(&self, concrete: TypeKey, capability: TypeKey) -> bool;
}

/// What the host exposes to an override while constructing a type
pub trait OverrideContext: CapabilityQuery {
    /// Type currently being constructed
    fn target(&self) -> TypeKey;

    /// Constructor the host selected for [`target`](Self::target),
    /// `None` when the host could not determine one
    fn selected_constructor(&self) -> Option<&ConstructorInfo>;
}

/// A resolution-time substitution consulted for every constructor dependency
pub trait ResolverOverride: Send + Sync + fmt::Debug {
    /// Value to use for `dependency`, `None` to let the host resolve it
    fn resolve(&self, context: &dyn OverrideContext, dependency: TypeKey)
    -> Result<Option<Instance>>;
}

/// The host resolution facility
pub trait ResolutionFacility: Send + Sync {
    /// Resolve `ty`, consulting `overrides` for every constructor dependency
    fn resolve_with(&self, ty: TypeKey, overrides: &[Box<dyn ResolverOverride>])
    -> Result<Instance>;

    /// Whether the user configured `ty` explicitly
    fn is_registered(&self, ty: TypeKey) -> bool;
}
