//! 16.16 fixed-point arithmetic.
//!
//! One unit is 1/65536 of a device pixel. Conversions to and from `f64`
//! round toward zero, matching the `XDoubleToFixed`/`XFixedToDouble`
//! pair this type is grounded on.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

const SHIFT: i32 = 16;
const SCALE: f64 = 65536.0;

/// A signed 16.16 fixed-point coordinate.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(pub i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(1 << SHIFT);
    pub const EPSILON: Fixed = Fixed(1);

    #[inline]
    pub fn from_i32(v: i32) -> Fixed {
        Fixed(v << SHIFT)
    }

    /// Rounds toward zero, like `XDoubleToFixed`.
    #[inline]
    pub fn from_f64(v: f64) -> Fixed {
        Fixed((v * SCALE) as i32)
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE
    }

    /// Largest integer `<= self`.
    #[inline]
    pub fn floor(self) -> i32 {
        self.0 >> SHIFT
    }

    /// Smallest integer `>= self`.
    #[inline]
    pub fn ceil(self) -> i32 {
        (self.0 + ((1 << SHIFT) - 1)) >> SHIFT
    }

    #[inline]
    pub fn is_integer(self) -> bool {
        self.0 & ((1 << SHIFT) - 1) == 0
    }

    /// Halfway point between `self` and `other`, computed the way
    /// `_lerp_half` does it: by shifting, not dividing, so the result
    /// stays exact for the de Casteljau subdivision that calls it.
    #[inline]
    pub fn lerp_half(self, other: Fixed) -> Fixed {
        Fixed(self.0 + ((other.0 - self.0) >> 1))
    }

    #[inline]
    pub fn abs(self) -> Fixed {
        Fixed(self.0.abs())
    }

    #[inline]
    pub fn min(self, other: Fixed) -> Fixed {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    #[inline]
    pub fn max(self, other: Fixed) -> Fixed {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }

    /// 32.32 signed product, for exact cross-product slope comparisons.
    #[inline]
    pub fn wide_mul(self, other: Fixed) -> i64 {
        (self.0 as i64) * (other.0 as i64)
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed({:.6})", self.to_f64())
    }
}

impl Add for Fixed {
    type Output = Fixed;
    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    #[inline]
    fn neg(self) -> Fixed {
        Fixed(-self.0)
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 -= rhs.0;
    }
}

/// Total order on `Fixed`, needed because `i32` is already totally
/// ordered; kept explicit since future representations (e.g. NaN-bearing)
/// would not be.
#[inline]
pub fn cmp(a: Fixed, b: Fixed) -> Ordering {
    a.0.cmp(&b.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_exact_on_integers() {
        for v in [-100, -1, 0, 1, 2, 65535] {
            let f = Fixed::from_i32(v);
            assert_eq!(f.to_f64(), v as f64);
            assert_eq!(f.floor(), v);
            assert_eq!(f.ceil(), v);
        }
    }

    #[test]
    fn floor_and_ceil_bracket_fractional_values() {
        let f = Fixed::from_f64(1.5);
        assert_eq!(f.floor(), 1);
        assert_eq!(f.ceil(), 2);

        let f = Fixed::from_f64(-1.5);
        assert_eq!(f.floor(), -2);
        assert_eq!(f.ceil(), -1);
    }

    #[test]
    fn lerp_half_is_exact_midpoint_for_even_deltas() {
        let a = Fixed::from_i32(10);
        let b = Fixed::from_i32(20);
        assert_eq!(a.lerp_half(b), Fixed::from_i32(15));
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(Fixed::from_f64(1.9999998).0, 131071);
        assert_eq!(Fixed::from_f64(-1.9999998).0, -131071);
    }
}
