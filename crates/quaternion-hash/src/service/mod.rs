//! Service Layer - Hashing orchestration
//!
//! Owns table construction, table sharing and the string fold.

pub mod quaternion_hasher;
pub mod table_cache;

pub use quaternion_hasher::QuaternionHasher;
pub use table_cache::{TableCache, TableKey};

use std::time::Instant;

use tracing::{debug, error, info};

use crate::domain::{CharQuaternionTable, HasherConfig};
use crate::error::HashError;
use crate::metrics::MetricsRecorder;

/// Build a table under `config`, with logging and metrics around it
pub(crate) fn build_table(
    config: &HasherConfig,
    metrics: &dyn MetricsRecorder,
) -> Result<CharQuaternionTable, HashError> {
    let start = Instant::now();
    debug!(
        shift = config.segment_index_shift,
        code_unit_hash = %config.code_unit_hash,
        parallel = config.parallel_build,
        "Building character quaternion table"
    );

    let table = CharQuaternionTable::build(config).inspect_err(|e| {
        metrics.record_degenerate();
        error!(
            shift = config.segment_index_shift,
            error = %e,
            "Character quaternion table construction failed"
        );
    })?;

    let elapsed = start.elapsed();
    metrics.record_table_built(elapsed);
    info!(
        shift = config.segment_index_shift,
        code_unit_hash = %config.code_unit_hash,
        entries = table.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Character quaternion table built"
    );

    Ok(table)
}
