//! Domain Port Interfaces
//!
//! Contracts between the auto-factory core and the resolution facility that
//! hosts it. The core only ever talks to the host through these traits:
//!
//! - the host resolves a type with a list of per-call overrides
//! - the host tells whether a type was configured explicitly
//! - while constructing a type, the host exposes the selected constructor
//!   and answers capability queries to the overrides it consults

/// Resolution facility and override ports
pub mod resolution;

pub use resolution::{CapabilityQuery, OverrideContext, ResolutionFacility, ResolverOverride};
