//! `decompositions` submodule implements LU decomposition with partial pivoting
//! and algorithms that are built upon it: determinant, inversion and solving of linear systems.
//!
//! All algorithms work on private copies of matrices, given matrices are never mutated.
//! Elimination is recorded as a list of [`RowOperation`]s which can be replayed onto other matrices,
//! that is how inverse is accumulated.
//!

use crate::{
    errors::{ensure_dimension, MathError, MathResult},
    floats::Scalar,
    matrices::Matrix,
    vectors::Vector,
    Sign,
};

/// [`RowOperation`] enum lists elementary row operations that are performed during elimination.
///
/// # Example
/// ```rust
/// # use linmath::{decompositions::RowOperation, matrices::Matrix};
/// let matrix: Matrix<f64> = Matrix::from([[2.0, 1.0], [4.0, 5.0]]);
/// let lu = matrix.decompose_lu().expect("Matrix is not singular.");
/// assert_eq!(
///     lu.operations(),
///     &[
///         RowOperation::Swap(0, 1),
///         RowOperation::AddMultiple { target: 1, source: 0, factor: -0.5 },
///     ]
/// );
/// ```
///
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RowOperation<T> {
    /// Swaps two rows.
    ///
    Swap(usize, usize),
    /// Multiplies row by a factor.
    ///
    Scale(usize, T),
    /// Adds source row multiplied by a factor to the target row.
    ///
    AddMultiple {
        /// Row that is changed.
        ///
        target: usize,
        /// Row that is added.
        ///
        source: usize,
        /// Multiplier of the source row.
        ///
        factor: T,
    },
}
impl<T: Scalar> RowOperation<T> {
    /// Applies operation to every given matrix in order.
    ///
    /// Caches of every touched matrix are invalidated.
    /// All matrices should have enough rows for this operation.
    ///
    pub(crate) fn apply(&self, matrices: &mut [&mut Matrix<T>]) {
        for matrix in matrices.iter_mut() {
            let columns: usize = matrix.columns();
            let elements: &mut [T] = matrix.elements_mut();
            match *self {
                RowOperation::Swap(a, b) => {
                    if a != b {
                        for c in 0..columns {
                            elements.swap(a * columns + c, b * columns + c);
                        }
                    }
                }
                RowOperation::Scale(row, factor) => elements[row * columns..(row + 1) * columns]
                    .iter_mut()
                    .for_each(|elem| *elem = *elem * factor),
                RowOperation::AddMultiple {
                    target,
                    source,
                    factor,
                } => {
                    for c in 0..columns {
                        let value: T = elements[source * columns + c];
                        elements[target * columns + c] = elements[target * columns + c] + factor * value;
                    }
                }
            }
        }
    }
}

/// [`LuDecomposition`] struct holds result of LU decomposition with partial pivoting.
///
/// Decomposition satisfies `P·A = L·U`, where `P` is the permutation matrix of recorded row swaps,
/// `L` is unit lower triangular and `U` is upper triangular.
///
/// # Example
/// ```rust
/// # use linmath::{matrices::Matrix, Sign};
/// let matrix: Matrix<f64> = Matrix::from([[1.0, 2.0], [2.0, 2.0]]);
/// let lu = matrix.decompose_lu().expect("Matrix is not singular.");
/// assert_eq!(lu.permutation(), &[1, 0]);
/// assert_eq!(lu.sign(), Sign::Negative);
/// assert_eq!(lu.lower(), &[[1.0, 0.0], [0.5, 1.0]]);
/// assert_eq!(lu.upper(), &[[2.0, 2.0], [0.0, 1.0]]);
/// assert_eq!(lu.determinant(), -2.0);
/// ```
///
#[derive(Clone, Debug)]
pub struct LuDecomposition<T> {
    /// Unit lower triangular factor.
    ///
    lower: Matrix<T>,
    /// Upper triangular factor.
    ///
    upper: Matrix<T>,
    /// Row `i` of permuted matrix is row `permutation[i]` of the original.
    ///
    permutation: Vec<usize>,
    /// Parity of the permutation.
    ///
    sign: Sign,
    /// Operations of forward elimination in order of their application.
    ///
    operations: Vec<RowOperation<T>>,
}
impl<T: Scalar> LuDecomposition<T> {
    /// Decomposes square matrix by Gaussian elimination with partial pivoting.
    ///
    /// Only exact-zero pivot is considered singular.
    ///
    fn new(matrix: &Matrix<T>) -> MathResult<Self> {
        let n: usize = matrix.rows();
        let mut upper: Matrix<T> = matrix.clone();
        let mut lower: Matrix<T> = Matrix::zero(n, n);
        let mut permutation: Vec<usize> = (0..n).collect();
        let mut sign: Sign = Sign::Positive;
        let mut operations: Vec<RowOperation<T>> = Vec::new();

        for k in 0..n {
            let mut pivot_row: usize = k;
            for r in (k + 1)..n {
                if upper[(r, k)].abs() > upper[(pivot_row, k)].abs() {
                    pivot_row = r;
                }
            }
            if pivot_row != k {
                let swap: RowOperation<T> = RowOperation::Swap(k, pivot_row);
                swap.apply(&mut [&mut upper, &mut lower]);
                operations.push(swap);
                permutation.swap(k, pivot_row);
                sign = -sign;
            }

            let pivot: T = upper[(k, k)];
            if pivot == T::zero() {
                log::debug!("zero pivot in column {k} of {n}x{n} matrix");
                return Err(MathError::Singular);
            }

            for r in (k + 1)..n {
                let value: T = upper[(r, k)];
                if value == T::zero() {
                    continue;
                }
                let factor: T = value / pivot;
                let elimination: RowOperation<T> = RowOperation::AddMultiple {
                    target: r,
                    source: k,
                    factor: -factor,
                };
                elimination.apply(&mut [&mut upper]);
                operations.push(elimination);
                upper.set(r, k, T::zero());
                lower.set(r, k, factor);
            }
        }
        for k in 0..n {
            lower.set(k, k, T::one());
        }

        Ok(LuDecomposition {
            lower,
            upper,
            permutation,
            sign,
            operations,
        })
    }

    /// Returns unit lower triangular factor.
    ///
    pub fn lower(&self) -> &Matrix<T> {
        &self.lower
    }
    /// Returns upper triangular factor.
    ///
    pub fn upper(&self) -> &Matrix<T> {
        &self.upper
    }
    /// Returns row permutation: row `i` of permuted matrix is row `permutation()[i]` of the original.
    ///
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }
    /// Returns permutation matrix `P`.
    ///
    pub fn permutation_matrix(&self) -> Matrix<T> {
        let n: usize = self.permutation.len();
        let mut matrix: Matrix<T> = Matrix::zero(n, n);
        for (r, &c) in self.permutation.iter().enumerate() {
            matrix.set(r, c, T::one());
        }
        matrix
    }
    /// Returns parity of the row permutation.
    ///
    pub fn sign(&self) -> Sign {
        self.sign
    }
    /// Returns recorded operations of forward elimination.
    ///
    pub fn operations(&self) -> &[RowOperation<T>] {
        &self.operations
    }
    /// Returns determinant of decomposed matrix (signed product of the upper factor's diagonal).
    ///
    pub fn determinant(&self) -> T {
        self.sign.apply_to(
            (0..self.upper.rows()).fold(T::one(), |acc, k| acc * self.upper[(k, k)]),
        )
    }
    /// Applies recorded row permutation to the matrix.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if matrix rows count differs from decomposed matrix size.
    ///
    pub fn permuted(&self, original: &Matrix<T>) -> MathResult<Matrix<T>> {
        ensure_dimension(self.permutation.len(), original.rows())?;
        let mut elements: Vec<T> = Vec::with_capacity(original.elements().len());
        for &r in &self.permutation {
            elements.extend_from_slice(original.row(r));
        }
        Ok(Matrix::from_parts(
            original.rows(),
            original.columns(),
            elements,
            None,
            None,
        ))
    }
    /// Returns factors `(L, U)`.
    ///
    pub fn into_factors(self) -> (Matrix<T>, Matrix<T>) {
        (self.lower, self.upper)
    }

    /// Solves `A·x = b` for decomposed matrix `A`.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if `b` dimension differs from decomposed matrix size.
    ///
    pub fn solve(&self, b: &Vector<T>) -> MathResult<Vector<T>> {
        ensure_dimension(self.upper.rows(), b.dimension())?;
        let rhs: Matrix<T> = Matrix::from_columns(std::slice::from_ref(b))?;
        Vector::new(self.reduce(rhs).elements())
    }
    /// Replays elimination onto the accumulator and then reduces upper factor to identity
    /// by back-substitution, replaying every operation onto the accumulator too.
    ///
    /// If accumulator starts as identity, it ends as inverse of decomposed matrix.
    ///
    fn reduce(&self, mut accumulator: Matrix<T>) -> Matrix<T> {
        for operation in &self.operations {
            operation.apply(&mut [&mut accumulator]);
        }

        let mut upper: Matrix<T> = self.upper.clone();
        for k in (0..upper.rows()).rev() {
            let scale: RowOperation<T> = RowOperation::Scale(k, T::one() / upper[(k, k)]);
            scale.apply(&mut [&mut upper, &mut accumulator]);
            for r in 0..k {
                let value: T = upper[(r, k)];
                if value == T::zero() {
                    continue;
                }
                let elimination: RowOperation<T> = RowOperation::AddMultiple {
                    target: r,
                    source: k,
                    factor: -value,
                };
                elimination.apply(&mut [&mut upper, &mut accumulator]);
            }
        }
        accumulator
    }
}

/// Returns error if matrix is not square.
///
fn ensure_square<T: Scalar>(matrix: &Matrix<T>) -> MathResult<()> {
    if matrix.is_square() {
        Ok(())
    } else {
        Err(MathError::NotSquare {
            rows: matrix.rows(),
            columns: matrix.columns(),
        })
    }
}

impl<T: Scalar> Matrix<T> {
    /// Performs LU decomposition with partial pivoting.
    ///
    /// # Errors
    /// Returns [`MathError::NotSquare`] if matrix is not square and
    /// [`MathError::Singular`] if exact-zero pivot was met.
    ///
    pub fn decompose_lu(&self) -> MathResult<LuDecomposition<T>> {
        ensure_square(self)?;
        log::trace!("LU decomposition of {}x{} matrix", self.rows(), self.columns());
        LuDecomposition::new(self)
    }
    /// Performs LU decomposition with partial pivoting and returns `(L, U)`.
    ///
    /// `L` is unit lower triangular and `U` is upper triangular, `L·U` equals this matrix
    /// with rows permuted by pivoting.
    ///
    /// # Errors
    /// Returns [`MathError::NotSquare`] if matrix is not square and
    /// [`MathError::Singular`] if exact-zero pivot was met.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// let matrix: Matrix<f64> = Matrix::from([[2.0, 4.0], [1.0, 3.0]]);
    /// let (l, u) = matrix.diagonalize_lu().expect("Matrix is not singular.");
    /// assert!(l.is_triangularised() && u.is_triangularised());
    /// assert_eq!((&l * &u).expect("Factors are square."), matrix);
    /// ```
    ///
    pub fn diagonalize_lu(&self) -> MathResult<(Matrix<T>, Matrix<T>)> {
        self.decompose_lu().map(LuDecomposition::into_factors)
    }

    /// Returns determinant of square matrix.
    ///
    /// Determinant of triangular matrix is the product of its diagonal,
    /// otherwise it is computed by LU decomposition (singular matrix has zero determinant).
    /// Result is cached.
    ///
    /// # Errors
    /// Returns [`MathError::NotSquare`] if matrix is not square.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// assert_eq!(Matrix::<f64>::from([[4.0, 3.0], [6.0, 3.0]]).determinant(), Ok(-6.0));
    /// assert_eq!(Matrix::<f64>::from([[1.0, 2.0], [2.0, 4.0]]).determinant(), Ok(0.0));
    /// assert!(Matrix::<f64>::zero(2, 3).determinant().is_err());
    /// ```
    ///
    pub fn determinant(&self) -> MathResult<T> {
        ensure_square(self)?;
        if let Some(&determinant) = self.determinant.get() {
            return Ok(determinant);
        }

        let determinant: T = if self.is_triangularised() {
            (0..self.rows()).fold(T::one(), |acc, k| acc * self[(k, k)])
        } else {
            match self.decompose_lu() {
                Ok(lu) => lu.determinant(),
                Err(MathError::Singular) => T::zero(),
                Err(error) => return Err(error),
            }
        };
        Ok(*self.determinant.get_or_init(|| determinant))
    }
    /// Returns inverse of square matrix.
    ///
    /// Identity matrix is returned as a copy right away, other matrices are decomposed and
    /// their upper factor is reduced to identity while the same row operations are replayed onto
    /// identity accumulator.
    ///
    /// # Errors
    /// Returns [`MathError::NotSquare`] if matrix is not square and
    /// [`MathError::Singular`] if matrix has no inverse.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// let matrix: Matrix<f64> = Matrix::from([[2.0, 0.0], [0.0, 2.0]]);
    /// assert_eq!(matrix.invert(), Ok(Matrix::from([[0.5, 0.0], [0.0, 0.5]])));
    /// ```
    ///
    pub fn invert(&self) -> MathResult<Matrix<T>> {
        ensure_square(self)?;
        log::trace!("inversion of {}x{} matrix", self.rows(), self.columns());
        if self.is_identity() {
            return Ok(self.clone());
        }
        let lu: LuDecomposition<T> = self.decompose_lu()?;
        Ok(lu.reduce(Matrix::identity(self.rows())))
    }
    /// Solves linear system `A·x = b`, where `A` is this matrix.
    ///
    /// # Errors
    /// Returns [`MathError::NotSquare`] if matrix is not square, [`MathError::DimensionMismatch`]
    /// if `b` dimension differs from matrix size and [`MathError::Singular`] if system has no unique solution.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::{matrices::Matrix, vectors::Vector};
    /// let matrix: Matrix<f64> = Matrix::from([[2.0, 0.0], [0.0, 4.0]]);
    /// let b: Vector<f64> = Vector::new([1.0, 1.0]).expect("Vector is not empty.");
    /// assert_eq!(matrix.solve(&b).expect("Matrix is not singular.").components(), &[0.5, 0.25]);
    /// ```
    ///
    pub fn solve(&self, b: &Vector<T>) -> MathResult<Vector<T>> {
        ensure_square(self)?;
        ensure_dimension(self.rows(), b.dimension())?;
        self.decompose_lu()?.solve(b)
    }
}

#[cfg(test)]
mod tests {
    use super::RowOperation;
    use crate::{errors::MathError, matrices::Matrix, vectors::Vector, Sign};

    #[test]
    fn row_operations() {
        let mut m1: Matrix<f64> = Matrix::from([[1.0, 0.0], [0.0, 1.0]]);
        let mut m2: Matrix<f64> = Matrix::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert!(m1.is_identity());

        RowOperation::Swap(0, 1).apply(&mut [&mut m1, &mut m2]);
        assert_eq!(m1, [[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(m2, [[4.0, 5.0, 6.0], [1.0, 2.0, 3.0]]);
        assert!(!m1.is_identity());

        RowOperation::Scale(1, 2.0).apply(&mut [&mut m2]);
        assert_eq!(m2, [[4.0, 5.0, 6.0], [2.0, 4.0, 6.0]]);

        RowOperation::AddMultiple {
            target: 0,
            source: 1,
            factor: -2.0,
        }
        .apply(&mut [&mut m2]);
        assert_eq!(m2, [[0.0, -3.0, -6.0], [2.0, 4.0, 6.0]]);
    }

    #[test]
    fn decomposition() {
        let matrix: Matrix<f64> = Matrix::from([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 10.0],
        ]);
        let lu = matrix.decompose_lu().expect("Matrix is not singular.");
        assert_eq!(lu.permutation(), &[2, 0, 1]);
        assert_eq!(lu.sign(), Sign::Positive);
        assert!(lu.lower().is_triangularised());
        assert!(lu.upper().is_triangularised());
        assert!((0..3).all(|k| lu.lower()[(k, k)] == 1.0));

        let pa: Matrix<f64> = (&lu.permutation_matrix() * &matrix).expect("Matrices are square.");
        let product: Matrix<f64> = (lu.lower() * lu.upper()).expect("Matrices are square.");
        assert!(product.almost_equal(&pa, 1e-12));
        assert!(product.almost_equal(&lu.permuted(&matrix).expect("Sizes are equal."), 1e-12));

        assert!((lu.determinant() - -3.0).abs() < 1e-9);

        let lu = Matrix::<f64>::zero(0, 0).decompose_lu().expect("Empty matrix is not singular.");
        assert_eq!(lu.permuted(&Matrix::zero(0, 3)).map(|m| m.size()), Ok((0, 3)));
        let lu = Matrix::<f64>::from([[0.0, 1.0], [1.0, 0.0]])
            .decompose_lu()
            .expect("Matrix is not singular.");
        assert_eq!(lu.permuted(&Matrix::zero(2, 0)).map(|m| m.size()), Ok((2, 0)));
        assert_eq!(
            lu.permuted(&Matrix::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])),
            Ok(Matrix::from([[4.0, 5.0, 6.0], [1.0, 2.0, 3.0]]))
        );

        assert_eq!(
            Matrix::<f64>::zero(2, 3).diagonalize_lu().map(|_| ()),
            Err(MathError::NotSquare {
                rows: 2,
                columns: 3
            })
        );
    }

    #[test]
    fn determinant() {
        let matrix: Matrix<f64> = Matrix::from([[4.0, 3.0], [6.0, 3.0]]);
        assert_eq!(matrix.determinant(), Ok(-6.0));
        assert_eq!(matrix.determinant(), Ok(-6.0));

        assert_eq!(Matrix::<f64>::from([[1.0, 2.0], [2.0, 4.0]]).determinant(), Ok(0.0));
        assert_eq!(Matrix::<f64>::from([[2.0, 7.0], [0.0, 3.0]]).determinant(), Ok(6.0));
        assert_eq!(Matrix::<f64>::identity(4).determinant(), Ok(1.0));
        assert_eq!(
            Matrix::<f64>::zero(3, 1).determinant(),
            Err(MathError::NotSquare {
                rows: 3,
                columns: 1
            })
        );
    }

    #[test]
    fn inversion() {
        let matrix: Matrix<f64> = Matrix::from([[2.0, 0.0], [0.0, 2.0]]);
        assert_eq!(matrix.invert(), Ok(Matrix::from([[0.5, 0.0], [0.0, 0.5]])));

        let matrix: Matrix<f64> = Matrix::from([
            [3.0, 0.0, 2.0],
            [2.0, 0.0, -2.0],
            [0.0, 1.0, 1.0],
        ]);
        let copy: Matrix<f64> = matrix.clone();
        let inverse: Matrix<f64> = matrix.invert().expect("Matrix is not singular.");
        assert_eq!(matrix, copy);

        let identity: Matrix<f64> = Matrix::identity(3);
        assert!((&matrix * &inverse)
            .expect("Matrices are square.")
            .almost_equal(&identity, 1e-12));
        assert!((&inverse * &matrix)
            .expect("Matrices are square.")
            .almost_equal(&identity, 1e-12));
        assert!(inverse
            .invert()
            .expect("Inverse is not singular.")
            .almost_equal(&matrix, 1e-12));

        assert_eq!(identity.invert(), Ok(identity.clone()));
        assert_eq!(
            Matrix::<f64>::from([[1.0, 2.0], [2.0, 4.0]]).invert(),
            Err(MathError::Singular)
        );
        assert!(matches!(
            Matrix::<f64>::zero(1, 2).invert(),
            Err(MathError::NotSquare { .. })
        ));
    }

    #[test]
    fn tiny_pivots() {
        let matrix: Matrix<f64> = Matrix::from([[1e-300, 0.0], [0.0, 1e-300]]);
        let inverse: Matrix<f64> = matrix.invert().expect("Tiny pivot is not zero.");
        assert!(inverse.almost_equal(&Matrix::from([[1e300, 0.0], [0.0, 1e300]]), 1e-12));

        let matrix: Matrix<f64> = Matrix::from([[1e-20, 1.0], [1.0, 1.0]]);
        let determinant: f64 = matrix.determinant().expect("Matrix is square.");
        assert!((determinant - -1.0).abs() < 1e-12);
        assert!(matrix.invert().is_ok());
    }

    #[test]
    fn solving() {
        let matrix: Matrix<f64> = Matrix::from([[2.0, 1.0], [1.0, 3.0]]);
        let b: Vector<f64> = Vector::new([3.0, 5.0]).expect("Vector is not empty.");
        let x: Vector<f64> = matrix.solve(&b).expect("Matrix is not singular.");
        assert!(x.almost_equal(
            &Vector::new([0.8, 1.4]).expect("Vector is not empty."),
            1e-12
        ));

        assert_eq!(
            matrix.solve(&Vector::new([1.0]).expect("Vector is not empty.")),
            Err(MathError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
    }
}
