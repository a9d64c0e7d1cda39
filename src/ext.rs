//! `ext` hidden submodule supplies helper enums and flags that are
//! used throughout `linmath` crate.
//!

use bitflags::bitflags;
use num_traits::{One, Zero};
use std::ops::{Mul, MulAssign, Neg};

/// [`Sign`] unit-only enum represents value's sign (value can be negative, positive or be equal to zero).
///
/// LU decomposition uses it to track parity of the row permutation.
///
/// # Example
/// ```rust
/// # use linmath::Sign;
/// let mut sign: Sign = Sign::Positive;
/// sign = -sign;
/// assert_eq!(sign, Sign::Negative * Sign::Positive);
/// assert_eq!(1 * (sign as i8), -1);
/// assert_eq!(sign.apply_to(2.5_f64), -2.5);
/// ```
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Negative sign (-1).
    ///
    Negative = -1,
    /// Zero (0).
    ///
    Zero = 0,
    /// Positive sign (+1).
    ///
    Positive = 1,
}
impl Sign {
    /// Multiplies given value by this sign.
    ///
    pub fn apply_to<T: Zero + One + Neg<Output = T>>(self, value: T) -> T {
        match self {
            Self::Negative => -value,
            Self::Zero => T::zero(),
            Self::Positive => value,
        }
    }
}
impl Neg for Sign {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Negative => Self::Positive,
            Self::Zero => Self::Zero,
            Self::Positive => Self::Negative,
        }
    }
}
impl Mul<Self> for Sign {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Positive, Self::Positive) | (Self::Negative, Self::Negative) => Self::Positive,
            (Self::Positive, Self::Negative) | (Self::Negative, Self::Positive) => Self::Negative,
            _ => Self::Zero,
        }
    }
}
impl MulAssign<Self> for Sign {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

bitflags! {
    /// [`Structure`] flags describe the shape of a square matrix's non-zero elements.
    ///
    /// They are the result of one full scan over the matrix, which is cached by
    /// [`Matrix`](crate::matrices::Matrix) until its elements are mutated.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::Structure;
    /// assert!(Structure::DIAGONAL.contains(Structure::UPPER_TRIANGULAR));
    /// assert!(!Structure::UPPER_TRIANGULAR.contains(Structure::DIAGONAL));
    /// ```
    ///
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Structure: u8 {
        /// Every element below the main diagonal is zero.
        ///
        const UPPER_TRIANGULAR = 0b0001;
        /// Every element above the main diagonal is zero.
        ///
        const LOWER_TRIANGULAR = 0b0010;
        /// Every element of the main diagonal equals one.
        ///
        const UNIT_DIAGONAL = 0b0100;

        /// Matrix is both upper and lower triangular.
        ///
        const DIAGONAL = Self::UPPER_TRIANGULAR.bits() | Self::LOWER_TRIANGULAR.bits();
        /// Diagonal matrix with ones on its main diagonal.
        ///
        const IDENTITY = Self::DIAGONAL.bits() | Self::UNIT_DIAGONAL.bits();
    }
}
impl Structure {
    /// Returns whether matrix is upper or lower triangular.
    ///
    pub fn is_triangular(self) -> bool {
        self.intersects(Structure::DIAGONAL)
    }
    /// Returns whether matrix is diagonal.
    ///
    pub fn is_diagonal(self) -> bool {
        self.contains(Structure::DIAGONAL)
    }
    /// Returns whether matrix is identity.
    ///
    pub fn is_identity(self) -> bool {
        self.contains(Structure::IDENTITY)
    }
}
