//! Domain Layer - Pure hashing logic
//!
//! This layer contains:
//! - Quaternion value type
//! - Code-unit domain and hash-code conventions
//! - Bit segmentation
//! - Character quaternion table
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No locking
//! - Pure functions where possible

pub mod code_unit;
pub mod config;
pub mod quaternion;
pub mod segments;
pub mod table;

pub use code_unit::{
    is_supported, CodeUnitHash, MAX_CODE_UNIT, MIN_CODE_UNIT, SUPPORTED_CODE_UNITS, TABLE_SLOTS,
};
pub use config::{HasherConfig, HasherConfigBuilder, DEFAULT_SEGMENT_INDEX_SHIFT};
pub use quaternion::{Quaternion, DIGEST_BYTES};
pub use segments::{code_unit_bytes, segment_index, segment_values, Segment};
pub use table::{derive_quaternion, CharQuaternionTable};
