//! Reference host container
//!
//! A small dependency injection container with the hooks parameterized
//! auto-factories need: resolution-time overrides, constructor introspection,
//! capability mappings, child containers and pre-build strategies.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`constructor`] | Declared constructors and argument access |
//! | [`lifetime`] | Instance lifetimes |
//! | [`strategy`] | Extension points |

pub mod constructor;
mod host;
pub mod lifetime;
pub mod strategy;

pub use constructor::{Arguments, Constructor, ConstructorBuilder, Injectable};
pub use host::Container;
pub use lifetime::Lifetime;
pub use strategy::{BuildStrategy, ContainerExtension};
