//! Character quaternion table
//!
//! Dense, immutable mapping from every supported code unit to its unit
//! quaternion. Built eagerly: a degenerate entry anywhere in the domain
//! fails construction instead of surfacing later as NaN.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::code_unit::{is_supported, CodeUnitHash, SUPPORTED_CODE_UNITS, TABLE_SLOTS};
use super::config::HasherConfig;
use super::quaternion::Quaternion;
use super::segments::segment_values;
use crate::error::HashError;

/// Unit quaternion for a single code unit
pub fn derive_quaternion(
    code_unit: u16,
    shift: i32,
    convention: CodeUnitHash,
) -> Result<Quaternion, HashError> {
    let [x, y, z, w] = segment_values(code_unit, shift, convention);

    Quaternion::new(x as f32, y as f32, z as f32, w as f32)
        .normalize()
        .ok_or_else(|| HashError::DegenerateQuaternion {
            context: format!(
                "code unit {:#06x} under shift {} ({} hash code)",
                code_unit, shift, convention
            ),
        })
}

fn derive_slot(slot: usize, config: &HasherConfig) -> Result<Option<Quaternion>, HashError> {
    let code_unit = slot as u16;
    if !is_supported(code_unit) {
        return Ok(None);
    }
    derive_quaternion(code_unit, config.segment_index_shift, config.code_unit_hash).map(Some)
}

#[cfg(feature = "parallel")]
fn derive_entries(config: &HasherConfig) -> Result<Vec<Option<Quaternion>>, HashError> {
    if config.parallel_build {
        (0..TABLE_SLOTS)
            .into_par_iter()
            .map(|slot| derive_slot(slot, config))
            .collect()
    } else {
        (0..TABLE_SLOTS).map(|slot| derive_slot(slot, config)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn derive_entries(config: &HasherConfig) -> Result<Vec<Option<Quaternion>>, HashError> {
    (0..TABLE_SLOTS).map(|slot| derive_slot(slot, config)).collect()
}

/// Immutable code unit → unit quaternion lookup
///
/// Slots `0x0000` and `0xFFFF` are always empty.
#[derive(Clone, Debug)]
pub struct CharQuaternionTable {
    entries: Box<[Option<Quaternion>]>,
    config: HasherConfig,
}

impl CharQuaternionTable {
    /// Derive every entry of the domain
    pub fn build(config: &HasherConfig) -> Result<Self, HashError> {
        let entries = derive_entries(config)?;
        debug_assert_eq!(entries.len(), TABLE_SLOTS);

        Ok(Self {
            entries: entries.into_boxed_slice(),
            config: *config,
        })
    }

    /// Quaternion for `code_unit`, `None` outside the supported domain
    pub fn get(&self, code_unit: u16) -> Option<Quaternion> {
        self.entries[code_unit as usize]
    }

    /// Quaternion for the code unit found at `position` of some input
    pub fn lookup(&self, code_unit: u16, position: usize) -> Result<Quaternion, HashError> {
        self.get(code_unit)
            .ok_or(HashError::UnsupportedCharacter {
                code_unit,
                position,
            })
    }

    pub fn contains(&self, code_unit: u16) -> bool {
        self.entries[code_unit as usize].is_some()
    }

    /// Number of populated entries
    pub fn len(&self) -> usize {
        SUPPORTED_CODE_UNITS
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Populated entries in ascending code-unit order
    pub fn iter(&self) -> impl Iterator<Item = (u16, Quaternion)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.map(|q| (slot as u16, q)))
    }

    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    pub fn segment_index_shift(&self) -> i32 {
        self.config.segment_index_shift
    }

    pub fn code_unit_hash(&self) -> CodeUnitHash {
        self.config.code_unit_hash
    }
}
