//! Single-precision quaternion value type
//!
//! Component order is `(x, y, z, w)` with `w` the scalar part. The product
//! and normalization are evaluated in the same operation order as the
//! managed-runtime `System.Numerics.Quaternion`, so hash values stay
//! bit-compatible with values produced there.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Mul, MulAssign};

/// Byte length of a serialized quaternion digest
pub const DIGEST_BYTES: usize = 16;

/// Quaternion with `f32` components
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// Multiplicative identity `(0, 0, 0, 1)`
    pub const IDENTITY: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn from_components(components: [f32; 4]) -> Self {
        Self::new(components[0], components[1], components[2], components[3])
    }

    pub const fn components(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    pub fn magnitude(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Scale to unit length
    ///
    /// Returns `None` for the zero quaternion (and for non-finite input),
    /// where the direction is undefined.
    pub fn normalize(&self) -> Option<Self> {
        let ls = self.length_squared();
        if !(ls > 0.0) || !ls.is_finite() {
            return None;
        }

        let inv_norm = 1.0 / ls.sqrt();
        Some(Self::new(
            self.x * inv_norm,
            self.y * inv_norm,
            self.z * inv_norm,
            self.w * inv_norm,
        ))
    }

    pub fn is_unit(&self, tolerance: f32) -> bool {
        (self.magnitude() - 1.0).abs() <= tolerance
    }

    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Component-wise comparison within an absolute tolerance
    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        self.components()
            .iter()
            .zip(other.components().iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Little-endian digest: x, y, z, w as IEEE-754 `f32`
    pub fn to_le_bytes(&self) -> [u8; DIGEST_BYTES] {
        let mut bytes = [0u8; DIGEST_BYTES];
        for (chunk, component) in bytes.chunks_exact_mut(4).zip(self.components()) {
            chunk.copy_from_slice(&component.to_le_bytes());
        }
        bytes
    }

    pub fn from_le_bytes(bytes: [u8; DIGEST_BYTES]) -> Self {
        let mut components = [0f32; 4];
        for (component, chunk) in components.iter_mut().zip(bytes.chunks_exact(4)) {
            *component = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self::from_components(components)
    }

    /// Lowercase hex rendering of [`Quaternion::to_le_bytes`]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_le_bytes())
    }
}

/// Hamilton product `self * rhs` (non-commutative)
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        let cx = self.y * rhs.z - self.z * rhs.y;
        let cy = self.z * rhs.x - self.x * rhs.z;
        let cz = self.x * rhs.y - self.y * rhs.x;

        let dot = self.x * rhs.x + self.y * rhs.y + self.z * rhs.z;

        Quaternion {
            x: self.x * rhs.w + rhs.x * self.w + cx,
            y: self.y * rhs.w + rhs.y * self.w + cy,
            z: self.z * rhs.w + rhs.z * self.w + cz,
            w: self.w * rhs.w - dot,
        }
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Quaternion) {
        *self = *self * rhs;
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}
