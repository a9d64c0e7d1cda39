//! `errors` submodule defines [`MathError`] enum which lists all errors that could occur
//! in `linmath` operations.
//!
//! Every precondition is checked synchronously, so failed operation never yields partial result.
//!

use std::{error::Error, fmt};

/// [`MathError`] enum lists all errors that could occur
/// during vector and matrix operations.
///
/// # Example
/// ```rust
/// # use linmath::errors::MathError;
/// # use linmath::vectors::Vector;
/// let v: Vector<f64> = Vector::new([1.0, 2.0]).expect("Vector is not empty.");
/// let w: Vector<f64> = Vector::new([1.0, 2.0, 3.0]).expect("Vector is not empty.");
/// assert_eq!(
///     (&v + &w).unwrap_err(),
///     MathError::DimensionMismatch { expected: 2, found: 3 }
/// );
/// ```
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MathError {
    /// Vector length or matrix shape is incompatible with the requested operation.
    ///
    DimensionMismatch {
        /// Dimension that was required.
        ///
        expected: usize,
        /// Dimension that was given.
        ///
        found: usize,
    },
    /// Determinant, decomposition or inversion was requested on a non-square matrix.
    ///
    NotSquare {
        /// Rows count of the matrix.
        ///
        rows: usize,
        /// Columns count of the matrix.
        ///
        columns: usize,
    },
    /// Exact-zero pivot was met during elimination, so matrix has no inverse.
    ///
    Singular,
    /// Argument does not satisfy operation's requirements
    /// (empty vector, wrong angle count, index out of bounds).
    ///
    InvalidArgument(String),
}
impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            MathError::NotSquare { rows, columns } => {
                write!(f, "matrix {rows}x{columns} is not square")
            }
            MathError::Singular => write!(f, "matrix is singular"),
            MathError::InvalidArgument(reason) => write!(f, "invalid argument: {reason}"),
        }
    }
}
impl Error for MathError {}

/// Type alias for results of `linmath` operations.
///
pub type MathResult<T> = Result<T, MathError>;

/// Checks that dimensions are equal.
///
pub(crate) fn ensure_dimension(expected: usize, found: usize) -> MathResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(MathError::DimensionMismatch { expected, found })
    }
}
