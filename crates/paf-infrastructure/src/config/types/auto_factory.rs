//! Auto-factory configuration types

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CACHE_CAPACITY;

/// Auto-factory extension configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoFactoryConfig {
    /// Distinct factory signatures kept per container before eviction
    pub cache_capacity: usize,
}

impl Default for AutoFactoryConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}
