//! Quaternion Hasher Service
//!
//! Folds a string's code units through the character quaternion table.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::warn;

use super::build_table;
use crate::domain::{CharQuaternionTable, CodeUnitHash, HasherConfig, Quaternion};
use crate::error::HashError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::QuaternionHashApi;

/// String hasher over a shared, immutable table
///
/// Cloning is cheap: clones share the table and the metrics recorder.
#[derive(Clone)]
pub struct QuaternionHasher {
    table: Arc<CharQuaternionTable>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl QuaternionHasher {
    /// Build a hasher (and its table) for `segment_index_shift`
    ///
    /// # Errors
    ///
    /// Returns `HashError::DegenerateQuaternion` if a table entry cannot be
    /// normalized.
    pub fn new(segment_index_shift: i32) -> Result<Self, HashError> {
        Self::with_config(HasherConfig::with_shift(segment_index_shift))
    }

    /// Build a hasher under `config` without metrics
    ///
    /// # Arguments
    ///
    /// * `config` - Segment index shift, hash-code convention and build mode
    ///
    /// # Errors
    ///
    /// Returns `HashError::DegenerateQuaternion` if a table entry cannot be
    /// normalized.
    pub fn with_config(config: HasherConfig) -> Result<Self, HashError> {
        Self::with_config_and_metrics(config, Arc::new(NoOpMetrics))
    }

    /// Build the table under `config`, reporting construction to `metrics`
    ///
    /// # Arguments
    ///
    /// * `config` - Table parameters
    /// * `metrics` - Recorder for the build and for every later hash
    ///
    /// # Errors
    ///
    /// Same as [`QuaternionHasher::with_config`].
    pub fn with_config_and_metrics(
        config: HasherConfig,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Result<Self, HashError> {
        let table = build_table(&config, metrics.as_ref())?;
        Ok(Self {
            table: Arc::new(table),
            metrics,
        })
    }

    /// Hasher over an already built table
    pub fn from_table(table: Arc<CharQuaternionTable>) -> Self {
        Self {
            table,
            metrics: Arc::new(NoOpMetrics),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn table(&self) -> &Arc<CharQuaternionTable> {
        &self.table
    }

    pub fn config(&self) -> &HasherConfig {
        self.table.config()
    }

    /// Hash a string over its UTF-16 code units
    ///
    /// # Returns
    ///
    /// The normalized left-to-right product of the characters' quaternions;
    /// the identity for an empty string.
    ///
    /// # Errors
    ///
    /// - `HashError::UnsupportedCharacter` for a `U+0000` or `U+FFFF` code unit
    /// - `HashError::DegenerateQuaternion` if the product cannot be normalized
    pub fn hash(&self, text: &str) -> Result<Quaternion, HashError> {
        self.fold(text.encode_utf16())
    }

    /// Hash raw UTF-16 code units
    ///
    /// Lone surrogates are accepted. Errors as [`QuaternionHasher::hash`].
    pub fn hash_code_units(&self, code_units: &[u16]) -> Result<Quaternion, HashError> {
        self.fold(code_units.iter().copied())
    }

    /// Hash a sequence of chars, each encoded as one or two code units
    pub fn hash_chars<I>(&self, chars: I) -> Result<Quaternion, HashError>
    where
        I: IntoIterator<Item = char>,
    {
        self.fold(chars.into_iter().flat_map(|ch| {
            let mut buf = [0u16; 2];
            let len = ch.encode_utf16(&mut buf).len();
            buf.into_iter().take(len)
        }))
    }

    /// Hash every text, stopping at the first failure
    pub fn hash_many(&self, texts: &[&str]) -> Result<Vec<Quaternion>, HashError> {
        texts.iter().map(|text| self.hash(text)).collect()
    }

    fn fold<I>(&self, code_units: I) -> Result<Quaternion, HashError>
    where
        I: IntoIterator<Item = u16>,
    {
        let start = Instant::now();
        let mut product = Quaternion::IDENTITY;
        let mut count = 0usize;

        for (position, code_unit) in code_units.into_iter().enumerate() {
            let q = self.table.lookup(code_unit, position).inspect_err(|_| {
                self.metrics.record_rejection();
                warn!(
                    code_unit = code_unit,
                    position = position,
                    "Rejected code unit outside the hashable domain"
                );
            })?;
            product *= q;
            count += 1;
        }

        let hash = product.normalize().ok_or_else(|| {
            self.metrics.record_degenerate();
            HashError::DegenerateQuaternion {
                context: format!("product of {} code units", count),
            }
        })?;

        self.metrics.record_hash(count, start.elapsed());
        Ok(hash)
    }
}

impl fmt::Debug for QuaternionHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuaternionHasher")
            .field("config", self.table.config())
            .finish_non_exhaustive()
    }
}

impl QuaternionHashApi for QuaternionHasher {
    fn hash(&self, text: &str) -> Result<Quaternion, HashError> {
        QuaternionHasher::hash(self, text)
    }

    fn hash_code_units(&self, code_units: &[u16]) -> Result<Quaternion, HashError> {
        QuaternionHasher::hash_code_units(self, code_units)
    }

    fn segment_index_shift(&self) -> i32 {
        self.table.segment_index_shift()
    }

    fn code_unit_hash(&self) -> CodeUnitHash {
        self.table.code_unit_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metrics;
    use std::sync::OnceLock;

    const EPS: f32 = 1e-6;

    fn hasher() -> &'static QuaternionHasher {
        static HASHER: OnceLock<QuaternionHasher> = OnceLock::new();
        HASHER.get_or_init(|| QuaternionHasher::new(0).expect("default hasher builds"))
    }

    #[test]
    fn test_empty_string_hashes_to_identity() {
        assert_eq!(hasher().hash("").unwrap(), Quaternion::IDENTITY);
        assert_eq!(hasher().hash_code_units(&[]).unwrap(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_single_character_golden_value() {
        let q = hasher().hash("A").unwrap();
        let sqrt5 = 5f32.sqrt();

        assert!(
            q.approx_eq(&Quaternion::new(2.0 / sqrt5, 0.0, 1.0 / sqrt5, 0.0), EPS),
            "hash(\"A\") = {}",
            q
        );
        assert_eq!(q.to_hex(), "30f9643f0000000030f9e43e00000000");
    }

    #[test]
    fn test_two_character_golden_values() {
        let ab = hasher().hash("AB").unwrap();
        let ba = hasher().hash("BA").unwrap();

        assert!(ab.approx_eq(&Quaternion::new(-0.4, -0.4, 0.8, -0.2), EPS), "AB = {}", ab);
        assert!(ba.approx_eq(&Quaternion::new(0.4, 0.4, -0.8, -0.2), EPS), "BA = {}", ba);
        assert_eq!(ab.to_hex(), "ceccccbececcccbececc4c3fcecc4cbe");
    }

    #[test]
    fn test_hash_is_order_sensitive() {
        assert_ne!(hasher().hash("ab").unwrap(), hasher().hash("ba").unwrap());
    }

    #[test]
    fn test_hash_is_deterministic() {
        let first = hasher().hash("determinism").unwrap();
        let second = hasher().hash("determinism").unwrap();

        assert_eq!(first.to_le_bytes(), second.to_le_bytes());
    }

    #[test]
    fn test_hash_matches_left_fold_of_table_entries() {
        let table = hasher().table();
        let expected = "xyz"
            .encode_utf16()
            .map(|unit| table.get(unit).unwrap())
            .fold(Quaternion::IDENTITY, |acc, q| acc * q)
            .normalize()
            .unwrap();

        assert_eq!(hasher().hash("xyz").unwrap(), expected);
    }

    #[test]
    fn test_hash_rejects_boundary_code_units() {
        let err = hasher().hash("ab\u{0}").unwrap_err();
        assert_eq!(
            err,
            HashError::UnsupportedCharacter {
                code_unit: 0x0000,
                position: 2
            }
        );

        let err = hasher().hash("\u{FFFF}").unwrap_err();
        assert_eq!(err.code_unit(), Some(0xFFFF));

        let err = hasher().hash_code_units(&[0x41, 0xFFFF]).unwrap_err();
        assert_eq!(err.code_unit(), Some(0xFFFF));
    }

    #[test]
    fn test_supplementary_plane_uses_surrogate_pairs() {
        let text = "\u{1F600}";
        let units: Vec<u16> = text.encode_utf16().collect();

        assert_eq!(units.len(), 2);
        assert_eq!(hasher().hash(text).unwrap(), hasher().hash_code_units(&units).unwrap());
        assert_eq!(hasher().hash(text).unwrap(), hasher().hash_chars(text.chars()).unwrap());
    }

    #[test]
    fn test_hash_many_stops_at_first_failure() {
        let hashes = hasher().hash_many(&["a", "b", ""]).unwrap();
        assert_eq!(hashes.len(), 3);
        assert_eq!(hashes[2], Quaternion::IDENTITY);

        assert!(hasher().hash_many(&["a", "\u{0}", "b"]).is_err());
    }

    #[test]
    fn test_metrics_are_recorded() {
        let metrics = Arc::new(Metrics::new());
        let hasher = hasher().clone().with_metrics(metrics.clone());

        hasher.hash("abc").unwrap();
        hasher.hash("").unwrap();
        let _ = hasher.hash("\u{FFFF}");

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.hashes_computed, 2);
        assert_eq!(snapshot.code_units_hashed, 3);
        assert_eq!(snapshot.unsupported_rejections, 1);
    }

    #[test]
    fn test_construction_is_reported_to_metrics() {
        let metrics = Arc::new(Metrics::new());
        let hasher = QuaternionHasher::with_config_and_metrics(
            HasherConfig::with_shift(2),
            metrics.clone(),
        )
        .unwrap();

        assert_eq!(metrics.snapshot().tables_built, 1);
        assert_eq!(QuaternionHashApi::segment_index_shift(&hasher), 2);
        assert_eq!(hasher.code_unit_hash(), CodeUnitHash::SignExtended);
    }

    #[test]
    fn test_hasher_through_port() {
        let api: &dyn QuaternionHashApi = hasher();

        assert_eq!(api.hash("A").unwrap(), hasher().hash("A").unwrap());
    }
}
