//! Inbound Ports (Driving Ports)
//!
//! The API that callers use to hash text.

use crate::domain::{CodeUnitHash, Quaternion};
use crate::error::HashError;

/// Primary hashing API (Driving Port)
pub trait QuaternionHashApi: Send + Sync {
    /// Hash a string over its UTF-16 code units
    ///
    /// # Returns
    /// A unit quaternion; the identity for empty input
    ///
    /// # Errors
    /// `UnsupportedCharacter` if the text contains U+0000 or U+FFFF
    fn hash(&self, text: &str) -> Result<Quaternion, HashError>;

    /// Hash raw UTF-16 code units
    fn hash_code_units(&self, code_units: &[u16]) -> Result<Quaternion, HashError>;

    /// Segment index shift of the underlying table
    fn segment_index_shift(&self) -> i32;

    /// Hash-code convention of the underlying table
    fn code_unit_hash(&self) -> CodeUnitHash;
}
