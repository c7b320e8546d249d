//! Fixed-point layout units
//!
//! All box geometry is stored as 16.16 fixed point so that nested percentage
//! and em resolutions do not accumulate floating point drift. Conversion to
//! floating point happens only when painting.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Subunits per logical unit
pub const FIXED_POINT_SCALE: i32 = 65536;

const FIXED_POINT_SCALE_F64: f64 = FIXED_POINT_SCALE as f64;

/// A signed 16.16 fixed point quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FixedPoint(i32);

impl FixedPoint {
    pub const ZERO: FixedPoint = FixedPoint(0);
    pub const MAX: FixedPoint = FixedPoint(i32::MAX);

    pub fn raw(self) -> i32 {
        self.0
    }

    /// Convert from a floating point quantity, rounding to the nearest subunit
    pub fn from_f64(value: f64) -> Self {
        // `as` saturates out of range values and maps NaN to zero
        Self((value * FIXED_POINT_SCALE_F64).round() as i32)
    }

    /// Whole logical units
    pub fn from_px(px: i32) -> Self {
        Self(px.saturating_mul(FIXED_POINT_SCALE))
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / FIXED_POINT_SCALE_F64
    }

    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// Multiply by a floating point factor
    pub fn scale(self, factor: f64) -> Self {
        Self::from_f64(self.to_f64() * factor)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Clamp negative values to zero
    pub fn non_negative(self) -> Self {
        self.max(Self::ZERO)
    }
}

impl Add for FixedPoint {
    type Output = FixedPoint;

    fn add(self, rhs: FixedPoint) -> FixedPoint {
        FixedPoint(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for FixedPoint {
    fn add_assign(&mut self, rhs: FixedPoint) {
        *self = *self + rhs;
    }
}

impl Sub for FixedPoint {
    type Output = FixedPoint;

    fn sub(self, rhs: FixedPoint) -> FixedPoint {
        FixedPoint(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for FixedPoint {
    fn sub_assign(&mut self, rhs: FixedPoint) {
        *self = *self - rhs;
    }
}

impl Neg for FixedPoint {
    type Output = FixedPoint;

    fn neg(self) -> FixedPoint {
        FixedPoint(self.0.saturating_neg())
    }
}

impl Mul<i32> for FixedPoint {
    type Output = FixedPoint;

    fn mul(self, rhs: i32) -> FixedPoint {
        FixedPoint(self.0.saturating_mul(rhs))
    }
}

impl Div<i32> for FixedPoint {
    type Output = FixedPoint;

    /// Integer division of the raw value; dividing by zero yields zero.
    fn div(self, rhs: i32) -> FixedPoint {
        FixedPoint(self.0.checked_div(rhs).unwrap_or(0))
    }
}

impl Sum for FixedPoint {
    fn sum<I: Iterator<Item = FixedPoint>>(iter: I) -> FixedPoint {
        iter.fold(FixedPoint::ZERO, |acc, v| acc + v)
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}
