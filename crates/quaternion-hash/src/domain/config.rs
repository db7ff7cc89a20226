//! Hasher configuration
//!
//! # Example
//!
//! ```ignore
//! use quaternion_hash::domain::{CodeUnitHash, HasherConfigBuilder};
//!
//! let config = HasherConfigBuilder::new()
//!     .segment_index_shift(2)
//!     .code_unit_hash(CodeUnitHash::Folded)
//!     .build();
//! ```

use serde::{Deserialize, Serialize};

use super::code_unit::CodeUnitHash;

/// Shift used when none is given
pub const DEFAULT_SEGMENT_INDEX_SHIFT: i32 = 0;

/// Parameters fixed at table construction
///
/// `segment_index_shift` and `code_unit_hash` select the hash family;
/// `parallel_build` only affects how fast the table is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    /// Offset added to each bit index before routing it to a segment
    pub segment_index_shift: i32,
    /// Hash-code function written into bytes 2..6 of the derivation buffer
    pub code_unit_hash: CodeUnitHash,
    /// Derive table entries on the rayon pool
    pub parallel_build: bool,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            segment_index_shift: DEFAULT_SEGMENT_INDEX_SHIFT,
            code_unit_hash: CodeUnitHash::default(),
            parallel_build: true,
        }
    }
}

impl HasherConfig {
    /// Default configuration with the given shift
    pub fn with_shift(segment_index_shift: i32) -> Self {
        Self {
            segment_index_shift,
            ..Self::default()
        }
    }

    /// Builder-style method to set the hash-code convention
    pub fn with_code_unit_hash(mut self, code_unit_hash: CodeUnitHash) -> Self {
        self.code_unit_hash = code_unit_hash;
        self
    }

    /// Builder-style method to toggle the parallel build
    pub fn with_parallel_build(mut self, parallel_build: bool) -> Self {
        self.parallel_build = parallel_build;
        self
    }

    /// Whether two configurations produce identical tables
    pub fn same_family(&self, other: &HasherConfig) -> bool {
        self.segment_index_shift.rem_euclid(4) == other.segment_index_shift.rem_euclid(4)
            && self.code_unit_hash == other.code_unit_hash
    }
}

/// Fluent builder for [`HasherConfig`]
#[derive(Default)]
pub struct HasherConfigBuilder {
    segment_index_shift: Option<i32>,
    code_unit_hash: Option<CodeUnitHash>,
    parallel_build: Option<bool>,
}

impl HasherConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment_index_shift(mut self, shift: i32) -> Self {
        self.segment_index_shift = Some(shift);
        self
    }

    pub fn code_unit_hash(mut self, convention: CodeUnitHash) -> Self {
        self.code_unit_hash = Some(convention);
        self
    }

    pub fn parallel_build(mut self, enabled: bool) -> Self {
        self.parallel_build = Some(enabled);
        self
    }

    /// Build the configuration, filling unset fields from the defaults
    pub fn build(self) -> HasherConfig {
        let defaults = HasherConfig::default();

        HasherConfig {
            segment_index_shift: self.segment_index_shift.unwrap_or(defaults.segment_index_shift),
            code_unit_hash: self.code_unit_hash.unwrap_or(defaults.code_unit_hash),
            parallel_build: self.parallel_build.unwrap_or(defaults.parallel_build),
        }
    }
}
