//! Recency-bounded caching
//!
//! | Type | Use |
//! |------|-----|
//! | [`EvictionCache`] | Single owner, `&mut` access |
//! | [`ConcurrentEvictionCache`] | Shared between threads |

mod lru;

pub use lru::{ConcurrentEvictionCache, EvictionCache};
