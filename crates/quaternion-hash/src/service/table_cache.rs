//! Table Cache
//!
//! Keeps built tables keyed by hash family so that each resident family is
//! shared between hashers.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use super::{build_table, QuaternionHasher};
use crate::domain::segments::SEGMENT_COUNT;
use crate::domain::{CharQuaternionTable, CodeUnitHash, HasherConfig};
use crate::error::HashError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};

/// Default number of resident tables
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

/// Cache key: the parameters that select a table's contents
///
/// Shifts congruent modulo 4 build identical tables, so the key stores the
/// shift reduced into `0..4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TableKey {
    /// `segment_index_shift.rem_euclid(4)`
    pub segment_index_shift: i32,
    pub code_unit_hash: CodeUnitHash,
}

impl From<&HasherConfig> for TableKey {
    fn from(config: &HasherConfig) -> Self {
        Self {
            segment_index_shift: config.segment_index_shift.rem_euclid(SEGMENT_COUNT as i32),
            code_unit_hash: config.code_unit_hash,
        }
    }
}

/// LRU cache of shared tables
///
/// The lock guards only lookups and insertions; tables are built with it
/// released. Two callers missing on the same key at once may both build,
/// and the first insertion wins.
pub struct TableCache {
    tables: Mutex<LruCache<TableKey, Arc<CharQuaternionTable>>>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl TableCache {
    /// Create a cache holding at most `capacity` tables
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of resident tables
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidConfig` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, HashError> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            HashError::InvalidConfig("table cache capacity must be non-zero".to_string())
        })?;

        Ok(Self {
            tables: Mutex::new(LruCache::new(capacity)),
            metrics: Arc::new(NoOpMetrics),
        })
    }

    /// Report table builds, and hashes made by handed-out hashers, to `metrics`
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Shared table for `config`, built on first request
    ///
    /// # Arguments
    ///
    /// * `config` - Hash family to look up; `parallel_build` only affects
    ///   how a missing table is built
    ///
    /// # Errors
    ///
    /// Returns `HashError::DegenerateQuaternion` if the table cannot be built.
    pub fn get_or_build(&self, config: &HasherConfig) -> Result<Arc<CharQuaternionTable>, HashError> {
        let key = TableKey::from(config);

        if let Some(table) = self.cached(&key) {
            debug!(shift = key.segment_index_shift, "Table cache hit");
            return Ok(table);
        }

        // Never build under the lock: a rayon build may run another cache
        // request on this same thread while it waits.
        let built = Arc::new(build_table(config, self.metrics.as_ref())?);

        let mut tables = self.tables.lock();
        if let Some(resident) = tables.get(&key) {
            debug!(
                shift = key.segment_index_shift,
                "Table inserted concurrently, keeping resident copy"
            );
            return Ok(Arc::clone(resident));
        }

        if let Some((evicted, _)) = tables.push(key, Arc::clone(&built)) {
            if evicted != key {
                debug!(
                    shift = evicted.segment_index_shift,
                    "Evicted least recently used table"
                );
            }
        }

        Ok(built)
    }

    fn cached(&self, key: &TableKey) -> Option<Arc<CharQuaternionTable>> {
        self.tables.lock().get(key).cloned()
    }

    /// Hasher over the cached table for `config`
    ///
    /// # Errors
    ///
    /// Same as [`TableCache::get_or_build`].
    pub fn hasher(&self, config: &HasherConfig) -> Result<QuaternionHasher, HashError> {
        let table = self.get_or_build(config)?;
        Ok(QuaternionHasher::from_table(table).with_metrics(Arc::clone(&self.metrics)))
    }

    pub fn contains(&self, config: &HasherConfig) -> bool {
        self.tables.lock().contains(&TableKey::from(config))
    }

    pub fn len(&self) -> usize {
        self.tables.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.tables.lock().cap().get()
    }

    /// Drop every cached table; hashers already handed out keep theirs
    pub fn clear(&self) {
        self.tables.lock().clear();
    }
}

impl Default for TableCache {
    fn default() -> Self {
        let capacity = match NonZeroUsize::new(DEFAULT_CACHE_CAPACITY) {
            Some(capacity) => capacity,
            None => NonZeroUsize::MIN,
        };

        Self {
            tables: Mutex::new(LruCache::new(capacity)),
            metrics: Arc::new(NoOpMetrics),
        }
    }
}

impl fmt::Debug for TableCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
