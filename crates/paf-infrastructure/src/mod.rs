//! # Parameterized Auto-Factory Infrastructure
//!
//! Implementations behind the domain contracts, plus the cross-cutting
//! technical concerns.
//!
//! ### Factories
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | O(1) least-recently-used eviction cache |
//! | [`factory`] | Override matching, factory building and provisioning |
//! | [`extension`] | Container extension enabling auto-factories |
//!
//! ### Host
//! | Module | Description |
//! |--------|-------------|
//! | [`container`] | Reference dependency injection container |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-layered TOML/env configuration |
//! | [`logging`] | Structured logging with tracing |
//! | [`constants`] | Infrastructure constants |

pub mod cache;
pub mod config;
pub mod constants;
pub mod container;
pub mod error_ext;
pub mod extension;
pub mod factory;
pub mod logging;

pub use error_ext::ErrorContext;
pub use extension::{AutoFactoryExtension, AutoFactoryStrategy};
