//! Domain layer constants
//!
//! Constants that shape the auto-factory domain model. Infrastructure
//! defaults (cache capacity, config file names) live in
//! `paf_infrastructure::constants`.

/// Largest delegate arity with a typed `Delegate` implementation
pub const MAX_DELEGATE_ARITY: usize = 8;

/// Separator used when rendering a resolution path
pub const RESOLUTION_PATH_SEPARATOR: &str = " -> ";
