//! Cached factory provisioning
//!
//! One provider serves one container. It answers "is this request a
//! parameterized factory, and if so which blueprint implements it", building
//! each distinct signature at most once.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use paf_domain::error::Result;
use paf_domain::value_objects::TypeKey;
use tracing::{debug, trace};

use super::{BlueprintBuilder, FactoryBlueprint, FactoryBuilder};
use crate::cache::ConcurrentEvictionCache;

/// Lookup counters of a [`FactoryProvider`]
#[derive(Debug, Default)]
pub struct ProviderStats {
    hits: AtomicU64,
    misses: AtomicU64,
    builds: AtomicU64,
    deferrals: AtomicU64,
}

impl ProviderStats {
    /// Requests served from the cache
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Parameterized requests not found in the cache on first look
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Blueprints built
    pub fn builds(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }

    /// Requests left to the host because the type was registered explicitly
    pub fn deferrals(&self) -> u64 {
        self.deferrals.load(Ordering::Relaxed)
    }

    fn record(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Per-container factory provider
///
/// Cached lookups only take the cache's internal lock; the build lock is held
/// while a missing blueprint is built so concurrent first requests for the
/// same signature build once.
pub struct FactoryProvider {
    cache: ConcurrentEvictionCache<TypeKey, Arc<FactoryBlueprint>>,
    build_lock: Mutex<()>,
    builder: Arc<dyn BlueprintBuilder>,
    stats: ProviderStats,
}

impl FactoryProvider {
    /// Create a provider caching up to `capacity` signatures
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_builder(capacity, Arc::new(FactoryBuilder::new()))
    }

    /// Create a provider that builds through `builder`
    pub fn with_builder(capacity: usize, builder: Arc<dyn BlueprintBuilder>) -> Result<Self> {
        Ok(Self {
            cache: ConcurrentEvictionCache::new(capacity)?,
            build_lock: Mutex::new(()),
            builder,
            stats: ProviderStats::default(),
        })
    }

    /// Blueprint for `requested`, `None` when the host should handle it
    ///
    /// Non-factory types are rejected without touching the cache. A cached
    /// blueprint is returned even if the type was registered since it was
    /// built; `is_registered` is only consulted on a miss.
    pub fn try_get_or_create<F>(
        &self,
        requested: TypeKey,
        is_registered: F,
    ) -> Result<Option<Arc<FactoryBlueprint>>>
    where
        F: FnOnce() -> bool,
    {
        if !requested.is_parameterized_delegate() {
            return Ok(None);
        }

        if let Some(blueprint) = self.cache.try_get(&requested) {
            ProviderStats::record(&self.stats.hits);
            trace!(delegate = %requested, "Factory cache hit");
            return Ok(Some(blueprint));
        }
        ProviderStats::record(&self.stats.misses);

        if is_registered() {
            ProviderStats::record(&self.stats.deferrals);
            debug!(delegate = %requested, "Delegate registered explicitly, deferring to container");
            return Ok(None);
        }

        let _guard = self
            .build_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another thread may have built it while we waited
        if let Some(blueprint) = self.cache.try_get(&requested) {
            ProviderStats::record(&self.stats.hits);
            return Ok(Some(blueprint));
        }

        let blueprint = Arc::new(self.builder.build(requested)?);
        ProviderStats::record(&self.stats.builds);
        debug!(delegate = %requested, "Built auto-factory");

        if let Some((evicted, _)) = self.cache.add_or_replace(requested, Arc::clone(&blueprint)) {
            debug!(evicted = %evicted, "Evicted least recently used factory");
        }

        Ok(Some(blueprint))
    }

    /// Drop every cached blueprint
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Number of cached blueprints
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Maximum number of cached blueprints
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Lookup counters
    pub fn stats(&self) -> &ProviderStats {
        &self.stats
    }
}

impl std::fmt::Debug for FactoryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryProvider")
            .field("cached", &self.cache.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
