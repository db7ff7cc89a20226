//! UTF-16 code-unit domain and the per-unit hash-code conventions
//!
//! The derivation buffer carries a 32-bit hash code next to the code unit
//! itself. Which function produces that hash code is a compatibility
//! parameter: every stored hash value was produced under exactly one
//! convention.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest code unit with a table entry
pub const MIN_CODE_UNIT: u16 = 0x0001;

/// Largest code unit with a table entry
pub const MAX_CODE_UNIT: u16 = 0xFFFE;

/// Slots in a dense table indexed by code unit (0x0000..=0xFFFF)
pub const TABLE_SLOTS: usize = 1 << 16;

/// Number of code units that receive a quaternion
pub const SUPPORTED_CODE_UNITS: usize = (MAX_CODE_UNIT - MIN_CODE_UNIT) as usize + 1;

/// Whether `code_unit` lies in the hashable domain `1..=65534`
pub const fn is_supported(code_unit: u16) -> bool {
    code_unit >= MIN_CODE_UNIT && code_unit <= MAX_CODE_UNIT
}

/// 32-bit hash-code function applied to a code unit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeUnitHash {
    /// Code unit reinterpreted as `i16` and sign-extended to `i32`
    #[default]
    SignExtended,
    /// `c | (c << 16)`, the managed-runtime `char` hash code
    Folded,
}

impl CodeUnitHash {
    pub fn hash_code(self, code_unit: u16) -> i32 {
        match self {
            CodeUnitHash::SignExtended => code_unit as i16 as i32,
            CodeUnitHash::Folded => {
                let value = code_unit as i32;
                value | (value << 16)
            }
        }
    }
}

impl fmt::Display for CodeUnitHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeUnitHash::SignExtended => write!(f, "sign-extended"),
            CodeUnitHash::Folded => write!(f, "folded"),
        }
    }
}
