//! Value objects describing types, constructors and factories
//!
//! Immutable descriptions shared by the factory core and the host container.

pub mod component;
pub mod constructor;
pub mod delegate;
pub mod type_key;

pub use component::{Component, Instance};
pub use constructor::{ConstructorInfo, ParameterInfo};
pub use delegate::{AutoFactory, Delegate, DelegateShape, ErasedFactory, FactoryFn, FactorySignature};
pub use type_key::TypeKey;
