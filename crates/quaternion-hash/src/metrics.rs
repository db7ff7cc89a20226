//! Metrics hooks for table construction and hashing
//!
//! Provides instrumentation points for monitoring build cost, hashing
//! throughput and rejected input.
//!
//! ## Usage
//!
//! ```ignore
//! use quaternion_hash::{Metrics, QuaternionHasher};
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(Metrics::new());
//! let hasher = QuaternionHasher::new(0)?.with_metrics(metrics.clone());
//! hasher.hash("hello")?;
//!
//! assert_eq!(metrics.snapshot().hashes_computed, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for quaternion hashing
///
/// Thread-safe counters shared by any number of hashers.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Tables constructed
    pub tables_built: AtomicU64,
    /// Cumulative table construction time in nanoseconds
    pub table_build_time_ns: AtomicU64,
    /// Successful hash operations
    pub hashes_computed: AtomicU64,
    /// Code units folded by successful hash operations
    pub code_units_hashed: AtomicU64,
    /// Cumulative hashing time in nanoseconds
    pub hash_time_ns: AtomicU64,
    /// Inputs rejected for an unsupported code unit
    pub unsupported_rejections: AtomicU64,
    /// Zero-vector normalizations (table or hash)
    pub degenerate_failures: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed table construction
    ///
    /// # Arguments
    ///
    /// * `duration` - Wall time spent deriving all 65,534 entries
    pub fn record_table_built(&self, duration: Duration) {
        self.tables_built.fetch_add(1, Ordering::Relaxed);
        self.table_build_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record a successful hash over `code_units` units
    ///
    /// # Arguments
    ///
    /// * `code_units` - Number of UTF-16 code units folded; zero for empty input
    /// * `duration` - Time spent in lookups, products and normalization
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use quaternion_hash::Metrics;
    ///
    /// let metrics = Metrics::new();
    /// metrics.record_hash(3, Duration::from_nanos(300));
    /// metrics.record_hash(0, Duration::from_nanos(100));
    ///
    /// let snapshot = metrics.snapshot();
    /// assert_eq!(snapshot.hashes_computed, 2);
    /// assert_eq!(snapshot.code_units_hashed, 3);
    /// assert_eq!(snapshot.avg_hash_ns, 200);
    /// ```
    pub fn record_hash(&self, code_units: usize, duration: Duration) {
        self.hashes_computed.fetch_add(1, Ordering::Relaxed);
        self.code_units_hashed
            .fetch_add(code_units as u64, Ordering::Relaxed);
        self.hash_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record a code unit rejected as `U+0000` or `U+FFFF`
    pub fn record_rejection(&self) {
        self.unsupported_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_degenerate(&self) {
        self.degenerate_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            tables_built: self.tables_built.load(Ordering::Relaxed),
            hashes_computed: self.hashes_computed.load(Ordering::Relaxed),
            code_units_hashed: self.code_units_hashed.load(Ordering::Relaxed),
            unsupported_rejections: self.unsupported_rejections.load(Ordering::Relaxed),
            degenerate_failures: self.degenerate_failures.load(Ordering::Relaxed),
            avg_table_build_ns: self.avg_table_build_time_ns(),
            avg_hash_ns: self.avg_hash_time_ns(),
        }
    }

    pub fn avg_table_build_time_ns(&self) -> u64 {
        let total = self.table_build_time_ns.load(Ordering::Relaxed);
        let count = self.tables_built.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    pub fn avg_hash_time_ns(&self) -> u64 {
        let total = self.hash_time_ns.load(Ordering::Relaxed);
        let count = self.hashes_computed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.tables_built.store(0, Ordering::Relaxed);
        self.table_build_time_ns.store(0, Ordering::Relaxed);
        self.hashes_computed.store(0, Ordering::Relaxed);
        self.code_units_hashed.store(0, Ordering::Relaxed);
        self.hash_time_ns.store(0, Ordering::Relaxed);
        self.unsupported_rejections.store(0, Ordering::Relaxed);
        self.degenerate_failures.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub tables_built: u64,
    pub hashes_computed: u64,
    pub code_units_hashed: u64,
    pub unsupported_rejections: u64,
    pub degenerate_failures: u64,
    pub avg_table_build_ns: u64,
    pub avg_hash_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to forward counters to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    fn record_table_built(&self, duration: Duration);

    fn record_hash(&self, code_units: usize, duration: Duration);

    fn record_rejection(&self);

    fn record_degenerate(&self);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Debug, Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_table_built(&self, _: Duration) {}
    fn record_hash(&self, _: usize, _: Duration) {}
    fn record_rejection(&self) {}
    fn record_degenerate(&self) {}
}

impl MetricsRecorder for Metrics {
    fn record_table_built(&self, duration: Duration) {
        Metrics::record_table_built(self, duration);
    }

    fn record_hash(&self, code_units: usize, duration: Duration) {
        Metrics::record_hash(self, code_units, duration);
    }

    fn record_rejection(&self) {
        Metrics::record_rejection(self);
    }

    fn record_degenerate(&self) {
        Metrics::record_degenerate(self);
    }
}
