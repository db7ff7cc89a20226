//! # Quaternion Hash
//!
//! Order-sensitive, non-cryptographic string hashing onto the unit
//! quaternion hypersphere.
//!
//! Every UTF-16 code unit in `1..=65534` owns a unit quaternion derived from
//! its bit pattern. A string hashes to the normalized left-to-right Hamilton
//! product of its code units' quaternions, starting from the identity.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `Quaternion`: `f32` value type, Hamilton product, normalization
//!   - `segment_values`: bit segmentation of one code unit
//!   - `CharQuaternionTable`: dense code unit → quaternion lookup
//!   - `HasherConfig`: shift and hash-code convention
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `QuaternionHashApi`: Driving port (inbound API)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `QuaternionHasher`: Implements `QuaternionHashApi`
//!   - `TableCache`: One shared table per hash family
//!
//! ## Invariants
//!
//! - Every table entry and every hash result has magnitude 1
//! - `hash("")` is the identity `(0, 0, 0, 1)`
//! - Code units 0x0000 and 0xFFFF are rejected, never silently mapped
//!
//! ## Usage Example
//!
//! ```ignore
//! use quaternion_hash::QuaternionHasher;
//!
//! let hasher = QuaternionHasher::new(0)?;
//!
//! let ab = hasher.hash("ab")?;
//! let ba = hasher.hash("ba")?;
//! assert_ne!(ab, ba);
//! ```
//!
//! Not suitable where collision resistance against adversarial input is
//! required.

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{
    CharQuaternionTable, CodeUnitHash, HasherConfig, HasherConfigBuilder, Quaternion,
};
pub use error::HashError;
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::QuaternionHashApi;
pub use service::{QuaternionHasher, TableCache, TableKey};
