//! Parameterized auto-factories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`matcher`] | Target/parameter matching and the ambiguity check |
//! | [`overrides`] | Per-invocation parameter overrides |
//! | [`builder`] | Signature analysis and callable binding |
//! | [`provider`] | Cached, build-once provisioning |

pub mod builder;
pub mod matcher;
pub mod overrides;
pub mod provider;

pub use builder::{BlueprintBuilder, FactoryBlueprint, FactoryBuilder};
pub use matcher::TargetOverrideMatcher;
pub use overrides::ParameterByTypeOverride;
pub use provider::{FactoryProvider, ProviderStats};
