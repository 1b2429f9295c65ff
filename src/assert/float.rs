//! ULP-based floating point equality.
//!
//! Two values are equal when neither is NaN and at most [`MAX_ULPS`]
//! representable values lie between them. The distance is computed on the
//! bit patterns: each pattern is read as a signed integer and negative values
//! are folded so that integer order matches floating point order across zero
//! (`biased = bits >= 0 ? bits : SIGN_BIT - bits`). The subtraction happens in
//! a type twice as wide as the pattern, so it can never overflow.

use std::fmt;

/// Largest distance, in units in the last place, still considered equal.
pub const MAX_ULPS: u8 = 4;

/// A floating point type with a per-width ULP distance.
pub trait FloatingPoint: Copy + PartialEq + fmt::Display {
    /// Unsigned integer of the same width as the float.
    type Distance: Copy + Ord + From<u8> + Into<u64> + fmt::Display;

    fn ulp_distance(self, other: Self) -> Self::Distance;

    fn is_nan(self) -> bool;

    fn is_infinite(self) -> bool;
}

impl FloatingPoint for f32 {
    type Distance = u32;

    fn ulp_distance(self, other: Self) -> u32 {
        let diff = biased_f32(self) - biased_f32(other);
        // |diff| <= 2 * i32::MAX, which fits in 32 unsigned bits.
        diff.unsigned_abs() as u32
    }

    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    fn is_infinite(self) -> bool {
        f32::is_infinite(self)
    }
}

impl FloatingPoint for f64 {
    type Distance = u64;

    fn ulp_distance(self, other: Self) -> u64 {
        let diff = biased_f64(self) - biased_f64(other);
        // |diff| <= 2 * i64::MAX, which fits in 64 unsigned bits.
        diff.unsigned_abs() as u64
    }

    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    fn is_infinite(self) -> bool {
        f64::is_infinite(self)
    }
}

fn biased_f32(value: f32) -> i64 {
    let bits = value.to_bits() as i32;
    if bits >= 0 {
        i64::from(bits)
    } else {
        i64::from(i32::MIN) - i64::from(bits)
    }
}

fn biased_f64(value: f64) -> i128 {
    let bits = value.to_bits() as i64;
    if bits >= 0 {
        i128::from(bits)
    } else {
        i128::from(i64::MIN) - i128::from(bits)
    }
}

/// ULP-tolerant equality. NaN is never equal to anything, and an infinity
/// is only equal to the same infinity.
pub fn float_equals<F: FloatingPoint>(v1: F, v2: F) -> bool {
    if v1.is_nan() || v2.is_nan() {
        return false;
    }
    if v1.is_infinite() || v2.is_infinite() {
        return v1 == v2;
    }
    v1.ulp_distance(v2) <= F::Distance::from(MAX_ULPS)
}

/// Wrapper whose `==` is [`float_equals`].
#[derive(Debug, Clone, Copy)]
pub struct Ulps<F>(pub F);

impl<F: FloatingPoint> Ulps<F> {
    pub fn value(self) -> F {
        self.0
    }

    pub fn distance_with(self, other: F) -> F::Distance {
        self.0.ulp_distance(other)
    }
}

impl<F: FloatingPoint> PartialEq for Ulps<F> {
    fn eq(&self, other: &Self) -> bool {
        float_equals(self.0, other.0)
    }
}

impl<F: FloatingPoint> PartialEq<F> for Ulps<F> {
    fn eq(&self, other: &F) -> bool {
        float_equals(self.0, *other)
    }
}

impl<F: FloatingPoint> fmt::Display for Ulps<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
