//! `floats` submodule implements [`Scalar`] trait that describes numeric capabilities which are required
//! by vectors and matrices, and several consts, functions and traits that help in work with floating point values.
//!
//! [`almost_equal`] function and [`EPSILON`] const are dealing with floating point equality.
//! Default equality of vectors and matrices is exact, so tolerant comparison is always explicit.
//!
//! [`FloatOperations`] trait and [`CLOSE_TO_ZERO`], [`CLOSE_TO_ONE`] consts are dealing with
//! distortions that may be caused by float operations.
//!

use num_traits::{Float, NumCast};
use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// [`Scalar`] trait is a capability set of numeric types which can be stored in vectors and matrices.
///
/// It requires zero, one, arithmetic, comparison and transcendental functions
/// (`sqrt`, `sin`, `cos`, `tan`, `asin`, `acos`, `atan2`), which are all supplied by [`Float`].
/// This trait is automatically implemented for `f32` and `f64`.
///
pub trait Scalar: Float + FloatOperations + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Returns default tolerance ([`EPSILON`]) converted into this type.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::floats::Scalar;
    /// assert_eq!(f64::tolerance(), 0.00001);
    /// ```
    ///
    fn tolerance() -> Self {
        <Self as NumCast>::from(EPSILON).unwrap_or_else(Self::epsilon)
    }
}
impl<T> Scalar for T where
    T: Float + FloatOperations + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

/// Constant that is used in floating point equality.
///
/// It represents amount of difference that is allowed for two values to still be considered
/// equal.
///
pub const EPSILON: f64 = 0.00001;
/// This function implements tolerant floating point equality for `linmath` crate.
///
/// Difference is compared against `epsilon` both absolutely (so that values close to zero can be equal to zero)
/// and relatively to the magnitude of compared values.
///
/// # Example
/// ```rust
/// # use linmath::floats::almost_equal;
/// assert!(almost_equal(0.15 + 0.15, 0.1 + 0.2, 0.00001));
/// assert!(almost_equal(1e-17, 0.0, 0.00001));
/// assert!(!almost_equal(1.0, 1.1, 0.00001));
/// ```
///
pub fn almost_equal<T: Float>(a: T, b: T, epsilon: T) -> bool {
    if a == b {
        return true;
    }

    let diff: T = (a - b).abs();
    let norm: T = (a.abs() + b.abs()).min(T::max_value());
    diff <= epsilon || diff < norm * epsilon
}

/// Feeds floating point value into hasher.
///
/// `-0.0` is hashed as `0.0`, so values that are equal produce equal hashes.
///
pub(crate) fn hash_scalar<T: Float, H: Hasher>(value: T, state: &mut H) {
    let value: T = if value == T::zero() { T::zero() } else { value };
    value.integer_decode().hash(state);
}

/// Constant that is used in floating point correction.
///
/// It defines the threshold for number to be considered small enough to then be floored.
///
pub const CLOSE_TO_ZERO: f64 = 0.0001;
/// Constant that is used in floating point correction.
///
/// It defines the threshold for number to be considered big enough to then be ceiled.
///
pub const CLOSE_TO_ONE: f64 = 0.9999;
/// [`FloatOperations`] trait defines `correct_to` and `round_up_to` associated functions that work
/// with floating point values.
///
pub trait FloatOperations {
    /// Corrects distortions that may be caused by float operations.
    ///
    /// For example, this function fixes such things as -0.0 into 0.0,
    /// 0.0001 (anything that is less than `CLOSE_TO_ZERO`) into 0.0 and
    /// 0.9999 (anything that is greater than `CLOSE_TO_ONE`) into 1.0.
    ///
    fn correct_to(self, digits: i32) -> Self;

    /// Rounds to given amount of digits after floating point.
    ///
    /// Passing negative number shifts floating point to the left.
    ///
    fn round_up_to(self, digits: i32) -> Self;
}
/// [`impl_float_operations`] macro implements [`FloatOperations`] for primitive float types.
///
macro_rules! impl_float_operations {
    ($($t:ty),+) => {$(
        #[allow(trivial_numeric_casts)]
        impl FloatOperations for $t {
            fn correct_to(self, digits: i32) -> Self {
                let mul: $t = (10.0 as $t).powi(digits);

                let n: $t = self * mul;
                if n == 0.0 {
                    return 0.0;
                }

                let fract: $t = n.abs().fract();
                if !((CLOSE_TO_ZERO as $t)..=(CLOSE_TO_ONE as $t)).contains(&fract) {
                    return n.round() / mul;
                }

                n / mul
            }

            fn round_up_to(self, digits: i32) -> Self {
                let mul: $t = (10.0 as $t).powi(digits);
                (self * mul).round() / mul
            }
        }
    )+};
}
impl_float_operations!(f32, f64);

#[cfg(test)]
mod tests {
    use super::{almost_equal, FloatOperations, Scalar};

    #[test]
    fn correction() {
        assert_eq!((-0.0_f32).correct_to(0), 0.0);
        assert_eq!(0.00009_f64.correct_to(0), 0.0);
        assert_eq!(0.99999_f64.correct_to(0), 1.0);
        assert_eq!(0.200009_f64.correct_to(1), 0.2);
    }

    #[test]
    fn rounding() {
        assert_eq!(12.345_f64.round_up_to(-1), 10.0);
        assert_eq!(12.345_f64.round_up_to(10), 12.345);
        assert_eq!(12.344_f32.round_up_to(2), 12.34);
    }

    #[test]
    fn equality() {
        let epsilon: f64 = f64::tolerance();
        assert!(almost_equal(1.0, 1.0 + 1e-12, epsilon));
        assert!(almost_equal(1e6, 1e6 + 1.0, epsilon));
        assert!(!almost_equal(0.0, 0.001, epsilon));
        assert!(!almost_equal(f64::NAN, f64::NAN, epsilon));
        assert_eq!(f32::tolerance(), 0.00001);
    }
}
