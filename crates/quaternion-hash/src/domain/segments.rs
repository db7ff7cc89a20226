//! Bit segmentation of a code unit into four quaternion components
//!
//! Layout of the 48-bit source (bit 0 = LSB of byte 0):
//!
//! ```text
//! bytes 0..2   code unit, little-endian
//! bytes 2..6   32-bit hash code, little-endian
//! ```
//!
//! Bit `i` is routed to segment `(i + shift) mod 4` at position `i / 4`.
//! Only bits `0..47` are routed; bit 47 never reaches a segment. Every
//! stored hash value depends on that, so it stays.

use bitvec::prelude::*;

use super::code_unit::CodeUnitHash;

/// Components per quaternion
pub const SEGMENT_COUNT: usize = 4;

/// Width of each segment buffer
pub const SEGMENT_BITS: usize = 12;

/// Bytes in the derivation buffer
pub const SOURCE_BYTES: usize = 6;

/// Bits in the derivation buffer
pub const SOURCE_BITS: usize = SOURCE_BYTES * 8;

/// Bits actually routed into segments
pub const DISTRIBUTED_BITS: usize = SOURCE_BITS - 1;

/// Fixed-width bit buffer accumulating one component
///
/// Newly accepted bits enter at position 0; earlier bits move toward
/// position 11 and fall off past it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    bits: BitVec<u16, Lsb0>,
}

impl Segment {
    pub fn new() -> Self {
        Self {
            bits: bitvec![u16, Lsb0; 0; SEGMENT_BITS],
        }
    }

    /// Accept the bit routed to `position`
    ///
    /// Position 0 overwrites bit 0. Any later position first moves the
    /// buffer one place toward the high end, then writes bit 0.
    pub fn accept(&mut self, position: usize, bit: bool) {
        if position > 0 {
            // bitvec names shifts by index direction: toward higher indices is the "end"
            self.bits.shift_end(1);
        }
        self.bits.set(0, bit);
    }

    /// Unsigned value of the buffer, bit 0 least significant
    pub fn value(&self) -> u16 {
        self.bits.load_le::<u16>()
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self::new()
    }
}

/// Segment receiving source bit `bit_index` under `shift`
pub fn segment_index(bit_index: usize, shift: i32) -> usize {
    (bit_index as i64 + shift as i64).rem_euclid(SEGMENT_COUNT as i64) as usize
}

/// Derivation buffer for `code_unit`
pub fn code_unit_bytes(code_unit: u16, convention: CodeUnitHash) -> [u8; SOURCE_BYTES] {
    let mut bytes = [0u8; SOURCE_BYTES];
    bytes[..2].copy_from_slice(&code_unit.to_le_bytes());
    bytes[2..].copy_from_slice(&convention.hash_code(code_unit).to_le_bytes());
    bytes
}

/// Integer values of the four segments `[x, y, z, w]`, each in `0..=4095`
pub fn segment_values(code_unit: u16, shift: i32, convention: CodeUnitHash) -> [u16; SEGMENT_COUNT] {
    let bytes = code_unit_bytes(code_unit, convention);
    let source = bytes.view_bits::<Lsb0>();

    let mut segments: [Segment; SEGMENT_COUNT] = std::array::from_fn(|_| Segment::new());
    for (i, bit) in source.iter().by_vals().take(DISTRIBUTED_BITS).enumerate() {
        segments[segment_index(i, shift)].accept(i / SEGMENT_COUNT, bit);
    }

    segments.map(|segment| segment.value())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_unit_bytes_layout() {
        assert_eq!(
            code_unit_bytes(0x0041, CodeUnitHash::SignExtended),
            [0x41, 0x00, 0x41, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            code_unit_bytes(0x8000, CodeUnitHash::SignExtended),
            [0x00, 0x80, 0x00, 0x80, 0xFF, 0xFF]
        );
        assert_eq!(
            code_unit_bytes(0x0041, CodeUnitHash::Folded),
            [0x41, 0x00, 0x41, 0x00, 0x41, 0x00]
        );
    }

    #[test]
    fn test_segment_accumulates_earliest_bit_highest() {
        let mut segment = Segment::new();
        segment.accept(0, true);
        segment.accept(1, false);
        segment.accept(2, true);

        assert_eq!(segment.value(), 0b101);
    }

    #[test]
    fn test_segment_position_zero_overwrites() {
        let mut segment = Segment::new();
        segment.accept(0, true);
        segment.accept(0, false);

        assert_eq!(segment.value(), 0);
    }

    #[test]
    fn test_segment_truncates_at_twelve_bits() {
        let mut segment = Segment::new();
        segment.accept(0, true);
        for position in 1..=SEGMENT_BITS {
            segment.accept(position, false);
        }

        assert_eq!(segment.value(), 0, "leading bit must fall off after 12 shifts");
    }

    #[test]
    fn test_segment_index_wraps_negative_shift() {
        assert_eq!(segment_index(0, 0), 0);
        assert_eq!(segment_index(5, 0), 1);
        assert_eq!(segment_index(0, -1), 3);
        assert_eq!(segment_index(2, 5), 3);
        assert_eq!(segment_index(46, i32::MAX), (46 + i32::MAX as usize) % 4);
    }

    #[test]
    fn test_segment_values_for_capital_a() {
        // 'A': source bits 0, 6, 16, 22 set
        assert_eq!(segment_values(0x41, 0, CodeUnitHash::SignExtended), [2176, 0, 1088, 0]);
        assert_eq!(segment_values(0x41, 1, CodeUnitHash::SignExtended), [0, 2176, 0, 1088]);
        assert_eq!(segment_values(0x41, 0, CodeUnitHash::Folded), [2184, 0, 1092, 0]);
    }

    #[test]
    fn test_shift_is_periodic_modulo_four() {
        for code_unit in [0x0001u16, 0x0041, 0x00E9, 0x8000, 0xFFFE] {
            let base = segment_values(code_unit, 1, CodeUnitHash::SignExtended);
            assert_eq!(base, segment_values(code_unit, 5, CodeUnitHash::SignExtended));
            assert_eq!(
                segment_values(code_unit, 3, CodeUnitHash::SignExtended),
                segment_values(code_unit, -1, CodeUnitHash::SignExtended)
            );
        }
    }

    #[test]
    fn test_last_source_bit_is_not_distributed() {
        // 0xFFFE sign-extends to 0xFFFFFFFE: bit 47 is set, but the w segment
        // under shift 0 only ever receives 11 bits.
        let [x, y, z, w] = segment_values(0xFFFE, 0, CodeUnitHash::SignExtended);

        assert_eq!([x, y, z, w], [1919, 4095, 4095, 2047]);
        assert!(w < 1 << 11);
    }

    #[test]
    fn test_high_code_units() {
        assert_eq!(segment_values(0x8000, 0, CodeUnitHash::SignExtended), [15, 15, 15, 143]);
        assert_eq!(segment_values(0x8000, 0, CodeUnitHash::Folded), [0, 0, 0, 136]);
        assert_eq!(segment_values(0x00E9, 0, CodeUnitHash::SignExtended), [2176, 1088, 1088, 1632]);
    }

    #[test]
    fn test_segment_values_fit_twelve_bits() {
        for code_unit in (1u16..=0xFFFE).step_by(97) {
            for value in segment_values(code_unit, 0, CodeUnitHash::SignExtended) {
                assert!(value < 1 << SEGMENT_BITS);
            }
        }
    }
}
