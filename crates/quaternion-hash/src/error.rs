//! Error types for the quaternion hash

use thiserror::Error;

/// Errors that can occur while building a table or hashing text
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("Unsupported character: code unit {code_unit:#06x} at position {position} (valid range 0x0001..=0xfffe)")]
    UnsupportedCharacter { code_unit: u16, position: usize },

    #[error("Degenerate quaternion: cannot normalize a zero vector ({context})")]
    DegenerateQuaternion { context: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl HashError {
    /// Code unit that caused an `UnsupportedCharacter` error, if any
    pub fn code_unit(&self) -> Option<u16> {
        match self {
            HashError::UnsupportedCharacter { code_unit, .. } => Some(*code_unit),
            _ => None,
        }
    }
}
