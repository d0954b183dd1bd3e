//! # Parameterized Auto-Factory Domain
//!
//! Types and contracts shared by the factory core and its host container.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error enum and `Result` alias |
//! | [`value_objects`] | Type keys, constructor descriptions, delegate signatures |
//! | [`ports`] | Resolution facility and override contracts |
//! | [`constants`] | Domain constants |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{CapabilityQuery, OverrideContext, ResolutionFacility, ResolverOverride};
pub use value_objects::{
    AutoFactory, Component, ConstructorInfo, Delegate, DelegateShape, ErasedFactory,
    FactorySignature, Instance, ParameterInfo, TypeKey,
};
