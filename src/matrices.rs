//! `matrices` submodule implements dense NxM matrices which can be used to apply transformations
//! on vectors.
//!
//! Structural properties of square matrices (triangular, diagonal, identity), determinant and hash code
//! are computed lazily and cached. Caches are reset whenever matrix elements are mutated in place,
//! which happens only inside `linmath` algorithms on their own scratch copies.
//!

use crate::{
    errors::{ensure_dimension, MathError, MathResult},
    floats::{almost_equal, hash_scalar, FloatOperations, Scalar},
    vectors::Vector,
    Structure,
};
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, Div, Index, Mul, Neg, Sub},
    slice::ChunksExact,
    sync::OnceLock,
};

/// [`Matrix`] struct implements linear algebra functions with matrices.
///
/// Elements are stored row by row. Dimensions are known only at runtime, so operations that
/// require compatible shapes return [`MathResult`].
///
/// Equality is exact; [`Matrix::almost_equal`] should be used for tolerant comparison.
///
/// # Example
/// ```rust
/// # use linmath::matrices::Matrix;
/// let m1: Matrix<f64> = Matrix::from([[1.0, 2.0], [3.0, 4.0]]);
/// let m2: Matrix<f64> = Matrix::from([[0.0, 1.0], [1.0, 0.0]]);
/// assert_eq!((&m1 * &m2).expect("Inner dimensions are equal."), [[2.0, 1.0], [4.0, 3.0]]);
///
/// let lower: Matrix<f64> = Matrix::from([[2.0, 0.0], [1.0, 4.0]]);
/// assert_eq!(lower.determinant(), Ok(8.0));
/// ```
///
#[derive(Clone, Debug)]
pub struct Matrix<T> {
    /// Count of rows.
    ///
    rows: usize,
    /// Count of columns.
    ///
    columns: usize,
    /// Underlying elements in row-major order.
    ///
    elements: Vec<T>,

    /// Cached structure of square matrix (`None` inside of cell means that matrix is not square).
    ///
    structure: OnceLock<Option<Structure>>,
    /// Cached determinant.
    ///
    pub(crate) determinant: OnceLock<T>,
    /// Cached hash code.
    ///
    hash: OnceLock<u64>,
}
impl<T: Scalar> Matrix<T> {
    /// Constructs matrix from its parts with optionally precomputed structure and determinant.
    ///
    pub(crate) fn from_parts(
        rows: usize,
        columns: usize,
        elements: Vec<T>,
        structure: Option<Structure>,
        determinant: Option<T>,
    ) -> Self {
        debug_assert_eq!(rows * columns, elements.len());
        let matrix: Matrix<T> = Matrix {
            rows,
            columns,
            elements,
            structure: OnceLock::new(),
            determinant: OnceLock::new(),
            hash: OnceLock::new(),
        };
        if let Some(structure) = structure {
            let _ = matrix.structure.set(Some(structure));
        }
        if let Some(determinant) = determinant {
            let _ = matrix.determinant.set(determinant);
        }
        matrix
    }

    /// Initializes matrix of given size with zeroes.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// let matrix: Matrix<f64> = Matrix::zero(3, 4);
    /// assert_eq!(matrix.size(), (3, 4));
    /// assert_eq!(matrix, [[0.0; 4]; 3]);
    /// ```
    ///
    pub fn zero(rows: usize, columns: usize) -> Self {
        Matrix::from_parts(rows, columns, vec![T::zero(); rows * columns], None, None)
    }
    /// Constructs matrix from rows.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if rows are of different length.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// let matrix: Matrix<f64> = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])
    ///     .expect("Rows are of equal length.");
    /// assert_eq!(matrix, [[1.0, 2.0], [3.0, 4.0]]);
    /// assert!(Matrix::<f64>::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
    /// ```
    ///
    pub fn from_rows(rows: Vec<Vec<T>>) -> MathResult<Self> {
        let columns: usize = rows.first().map_or(0, Vec::len);
        let mut elements: Vec<T> = Vec::with_capacity(rows.len() * columns);
        for row in &rows {
            ensure_dimension(columns, row.len())?;
            elements.extend_from_slice(row);
        }
        Ok(Matrix::from_parts(rows.len(), columns, elements, None, None))
    }
    /// Constructs matrix from jagged rows.
    ///
    /// Every row is padded with zeroes to the length of the longest row,
    /// so shape of the input is silently changed.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// let matrix: Matrix<f64> = Matrix::from_jagged(vec![vec![1.0], vec![2.0, 3.0, 4.0]]);
    /// assert_eq!(matrix, [[1.0, 0.0, 0.0], [2.0, 3.0, 4.0]]);
    /// ```
    ///
    pub fn from_jagged(rows: Vec<Vec<T>>) -> Self {
        let columns: usize = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut elements: Vec<T> = Vec::with_capacity(rows.len() * columns);
        for row in &rows {
            elements.extend_from_slice(row);
            elements.resize(elements.len() + columns - row.len(), T::zero());
        }
        Matrix::from_parts(rows.len(), columns, elements, None, None)
    }
    /// Constructs matrix whose columns are given vectors.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if no vectors were given and
    /// [`MathError::DimensionMismatch`] if vectors' dimensions differ.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::{matrices::Matrix, vectors::Vector};
    /// let columns: Vec<Vector<f64>> = vec![
    ///     Vector::new([1.0, 2.0]).expect("Vector is not empty."),
    ///     Vector::new([3.0, 4.0]).expect("Vector is not empty."),
    ///     Vector::new([5.0, 6.0]).expect("Vector is not empty."),
    /// ];
    /// let matrix: Matrix<f64> = Matrix::from_columns(&columns).expect("Dimensions are equal.");
    /// assert_eq!(matrix, [[1.0, 3.0, 5.0], [2.0, 4.0, 6.0]]);
    /// assert_eq!(matrix.to_vectors().expect("Matrix has rows."), columns);
    /// ```
    ///
    pub fn from_columns(columns: &[Vector<T>]) -> MathResult<Self> {
        let rows: usize = columns.first().map(Vector::dimension).ok_or_else(|| {
            MathError::InvalidArgument(String::from("at least one column vector is required"))
        })?;
        for column in columns {
            ensure_dimension(rows, column.dimension())?;
        }
        let mut elements: Vec<T> = Vec::with_capacity(rows * columns.len());
        for r in 0..rows {
            elements.extend(columns.iter().map(|column| column[r]));
        }
        Ok(Matrix::from_parts(rows, columns.len(), elements, None, None))
    }
    /// Returns columns of matrix as vectors.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if matrix has no rows (vectors can't be empty).
    ///
    pub fn to_vectors(&self) -> MathResult<Vec<Vector<T>>> {
        if self.rows == 0 {
            return Err(MathError::InvalidArgument(String::from(
                "matrix without rows has no column vectors",
            )));
        }
        Ok((0..self.columns)
            .map(|c| Vector::from_components((0..self.rows).map(|r| self[(r, c)]).collect()))
            .collect())
    }

    /// Returns count of matrix rows.
    ///
    pub fn rows(&self) -> usize {
        self.rows
    }
    /// Returns count of matrix columns.
    ///
    pub fn columns(&self) -> usize {
        self.columns
    }
    /// Returns matrix size as a tuple.
    ///
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }
    /// Returns whether matrix is square.
    ///
    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    /// Returns elements of matrix in row-major order.
    ///
    pub fn elements(&self) -> &[T] {
        &self.elements
    }
    /// Returns row of matrix.
    ///
    /// Panics if row is out of bounds.
    ///
    pub fn row(&self, row: usize) -> &[T] {
        &self.elements[row * self.columns..(row + 1) * self.columns]
    }
    /// Returns iterator over rows of matrix.
    ///
    pub fn iter_rows(&self) -> ChunksExact<'_, T> {
        // `chunks_exact` panics on zero chunk size, matrix without columns has rows of zero length.
        self.elements.chunks_exact(self.columns.max(1))
    }
    /// Returns matrix as a vector of rows.
    ///
    pub fn as_rows(&self) -> Vec<Vec<T>> {
        if self.columns == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.iter_rows().map(<[T]>::to_vec).collect()
    }
    /// Returns element by its row and column.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if position is out of bounds.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// let matrix: Matrix<f64> = Matrix::from([[1.0, 2.0], [3.0, 4.0]]);
    /// assert_eq!(matrix.get(1, 0), Ok(3.0));
    /// assert!(matrix.get(0, 2).is_err());
    /// ```
    ///
    pub fn get(&self, row: usize, column: usize) -> MathResult<T> {
        if row >= self.rows || column >= self.columns {
            return Err(MathError::InvalidArgument(format!(
                "position ({row}, {column}) is out of bounds for {}x{} matrix",
                self.rows, self.columns
            )));
        }
        Ok(self.elements[row * self.columns + column])
    }

    /// Returns mutable access to elements and resets all cached properties.
    ///
    pub(crate) fn elements_mut(&mut self) -> &mut [T] {
        self.invalidate();
        &mut self.elements
    }
    /// Sets element by its row and column and resets all cached properties.
    ///
    pub(crate) fn set(&mut self, row: usize, column: usize, value: T) {
        let columns: usize = self.columns;
        self.elements_mut()[row * columns + column] = value;
    }
    /// Resets cached structure, determinant and hash code.
    ///
    pub(crate) fn invalidate(&mut self) {
        let _ = self.structure.take();
        let _ = self.determinant.take();
        let _ = self.hash.take();
    }

    /// Returns structure of square matrix or `None` if matrix is not square.
    ///
    /// Triangular, diagonal and identity properties are computed together in one scan and then cached.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::{matrices::Matrix, Structure};
    /// let matrix: Matrix<f64> = Matrix::from([[1.0, 2.0], [0.0, 1.0]]);
    /// assert_eq!(matrix.structure(), Some(Structure::UPPER_TRIANGULAR | Structure::UNIT_DIAGONAL));
    /// assert_eq!(Matrix::<f64>::zero(2, 3).structure(), None);
    /// ```
    ///
    pub fn structure(&self) -> Option<Structure> {
        *self.structure.get_or_init(|| self.scan_structure())
    }
    /// Scans square matrix and returns its structure.
    ///
    fn scan_structure(&self) -> Option<Structure> {
        if !self.is_square() {
            return None;
        }
        let mut structure: Structure = Structure::all();
        for (r, row) in self.iter_rows().enumerate() {
            for (c, &elem) in row.iter().enumerate() {
                if r > c && elem != T::zero() {
                    structure.remove(Structure::UPPER_TRIANGULAR);
                } else if r < c && elem != T::zero() {
                    structure.remove(Structure::LOWER_TRIANGULAR);
                } else if r == c && elem != T::one() {
                    structure.remove(Structure::UNIT_DIAGONAL);
                }
            }
        }
        Some(structure)
    }
    /// Returns whether matrix is square and upper or lower triangular.
    ///
    pub fn is_triangularised(&self) -> bool {
        self.structure().is_some_and(Structure::is_triangular)
    }
    /// Returns whether matrix is square and diagonal.
    ///
    pub fn is_diagonalized(&self) -> bool {
        self.structure().is_some_and(Structure::is_diagonal)
    }
    /// Returns whether matrix is identity.
    ///
    pub fn is_identity(&self) -> bool {
        self.structure().is_some_and(Structure::is_identity)
    }
    /// Returns whether the last row of matrix is `[0, ..., 0, 1]`.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// assert!(Matrix::<f64>::from([[2.0, 3.0], [0.0, 1.0]]).is_normal_space());
    /// assert!(!Matrix::<f64>::from([[2.0, 3.0], [1.0, 1.0]]).is_normal_space());
    /// ```
    ///
    pub fn is_normal_space(&self) -> bool {
        if self.rows == 0 || self.columns == 0 {
            return false;
        }
        match self.row(self.rows - 1).split_last() {
            Some((&last, leading)) => {
                last == T::one() && leading.iter().all(|&elem| elem == T::zero())
            }
            None => false,
        }
    }

    /// Applies function to every matrix element and returns changed matrix.
    ///
    pub fn map(&self, f: impl Fn(T) -> T) -> Self {
        Matrix::from_parts(
            self.rows,
            self.columns,
            self.elements.iter().map(|&elem| f(elem)).collect(),
            None,
            None,
        )
    }
    /// Combines matrices by applying function on their elements.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if sizes are not equal.
    ///
    pub fn combine(&self, other: &Self, f: impl Fn(T, T) -> T) -> MathResult<Self> {
        ensure_dimension(self.rows, other.rows)?;
        ensure_dimension(self.columns, other.columns)?;
        Ok(Matrix::from_parts(
            self.rows,
            self.columns,
            self.elements
                .iter()
                .zip(other.elements.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            None,
            None,
        ))
    }
    /// Returns transpose of initial matrix.
    ///
    /// Interchanges its rows into columns (flips matrix over its diagonal).
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// let matrix: Matrix<f64> = Matrix::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    /// assert_eq!(matrix.transpose(), [[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]);
    /// ```
    ///
    pub fn transpose(&self) -> Self {
        let mut elements: Vec<T> = Vec::with_capacity(self.elements.len());
        for c in 0..self.columns {
            elements.extend((0..self.rows).map(|r| self[(r, c)]));
        }
        Matrix::from_parts(self.columns, self.rows, elements, None, None)
    }

    /// Adds matrices element-wise.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if sizes are not equal.
    ///
    pub fn checked_add(&self, other: &Self) -> MathResult<Self> {
        self.combine(other, |a, b| a + b)
    }
    /// Subtracts matrices element-wise.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if sizes are not equal.
    ///
    pub fn checked_sub(&self, other: &Self) -> MathResult<Self> {
        self.combine(other, |a, b| a - b)
    }
    /// Performs dot product operation on two matrices.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if columns of `self` don't match rows of `other`.
    ///
    pub fn dot_product(&self, other: &Self) -> MathResult<Self> {
        ensure_dimension(self.columns, other.rows)?;
        let mut elements: Vec<T> = Vec::with_capacity(self.rows * other.columns);
        for r in 0..self.rows {
            for c in 0..other.columns {
                elements.push(
                    (0..self.columns).fold(T::zero(), |acc, k| acc + self[(r, k)] * other[(k, c)]),
                );
            }
        }
        Ok(Matrix::from_parts(
            self.rows,
            other.columns,
            elements,
            None,
            None,
        ))
    }
    /// Multiplies matrix by column vector (`M · v`).
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if columns count doesn't match vector dimension and
    /// [`MathError::InvalidArgument`] if matrix has no rows.
    ///
    pub fn transform_vector(&self, vector: &Vector<T>) -> MathResult<Vector<T>> {
        ensure_dimension(self.columns, vector.dimension())?;
        if self.rows == 0 {
            return Err(MathError::InvalidArgument(String::from(
                "matrix without rows can't produce a vector",
            )));
        }
        Ok(Vector::from_components(
            self.iter_rows()
                .map(|row| {
                    row.iter()
                        .zip(vector.iter())
                        .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
                })
                .collect(),
        ))
    }
    /// Multiplies row vector by matrix (`v · M`).
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if rows count doesn't match vector dimension and
    /// [`MathError::InvalidArgument`] if matrix has no columns.
    ///
    pub fn transform_row_vector(&self, vector: &Vector<T>) -> MathResult<Vector<T>> {
        ensure_dimension(self.rows, vector.dimension())?;
        if self.columns == 0 {
            return Err(MathError::InvalidArgument(String::from(
                "matrix without columns can't produce a vector",
            )));
        }
        Ok(Vector::from_components(
            (0..self.columns)
                .map(|c| {
                    vector
                        .iter()
                        .enumerate()
                        .fold(T::zero(), |acc, (r, &elem)| acc + elem * self[(r, c)])
                })
                .collect(),
        ))
    }
    /// Applies affine transform to a point.
    ///
    /// Point is converted to normal space, multiplied as a row vector by this matrix
    /// and converted back (with perspective divide if needed).
    /// This is the convention that transforms from [`transforms`](crate::transforms) follow.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if matrix is not `(n + 1)x(n + 1)` for a point of dimension `n`.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::{matrices::Matrix, vectors::Vector};
    /// let translation: Matrix<f64> = Matrix::translation(&[2.0, 3.0]);
    /// let point: Vector<f64> = Vector::new([0.0, 2.0]).expect("Vector is not empty.");
    /// assert_eq!(
    ///     translation.apply_to(&point),
    ///     Ok(Vector::new([2.0, 5.0]).expect("Vector is not empty."))
    /// );
    /// ```
    ///
    pub fn apply_to(&self, point: &Vector<T>) -> MathResult<Vector<T>> {
        ensure_dimension(self.columns, point.dimension() + 1)?;
        self.transform_row_vector(&point.to_normal_space())?
            .from_normal_space()
    }

    /// Checks whether matrices are equal with given tolerance.
    ///
    /// Matrices of different sizes are never equal.
    ///
    pub fn almost_equal(&self, other: &Self, epsilon: T) -> bool {
        self.size() == other.size()
            && self
                .elements
                .iter()
                .zip(other.elements.iter())
                .all(|(&a, &b)| almost_equal(a, b, epsilon))
    }
    /// Returns hash code of matrix which is computed from all of its elements once and then cached.
    ///
    pub fn hash_code(&self) -> u64 {
        *self.hash.get_or_init(|| {
            let mut hasher: DefaultHasher = DefaultHasher::new();
            self.size().hash(&mut hasher);
            self.elements
                .iter()
                .for_each(|&elem| hash_scalar(elem, &mut hasher));
            hasher.finish()
        })
    }
}
impl<T: Scalar> FloatOperations for Matrix<T> {
    /// Constructs new matrix by correcting every matrix element that may be wronged by float operations.
    ///
    /// Fixes such things as -0.0 into 0.0, 0.00000001 into 0.0 and 0.99999999 into 1.0.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// # use linmath::floats::FloatOperations;
    /// let matrix: Matrix<f64> = Matrix::from([[-0.0, 0.00000001, 0.99999999]]).correct_to(0);
    /// assert_eq!(matrix, [[0.0, 0.0, 1.0]]);
    /// ```
    ///
    fn correct_to(self, digits: i32) -> Self {
        self.map(|elem| elem.correct_to(digits))
    }
    /// Constructs new matrix by rounding every matrix element up to specified number of digits after floating
    /// point.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// # use linmath::floats::FloatOperations;
    /// let matrix: Matrix<f64> = Matrix::from([[0.25, 0.00005, 0.1]]).round_up_to(1);
    /// assert_eq!(matrix, [[0.3, 0.0, 0.1]]);
    /// ```
    ///
    fn round_up_to(self, digits: i32) -> Self {
        self.map(|elem| elem.round_up_to(digits))
    }
}
impl<T: Scalar> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    /// Returns element by its row and column.
    ///
    /// Panics if position is out of bounds, [`Matrix::get`] is the checked alternative.
    ///
    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.rows && column < self.columns,
            "position ({row}, {column}) is out of bounds for {}x{} matrix",
            self.rows,
            self.columns
        );
        &self.elements[row * self.columns + column]
    }
}
impl<T: Scalar> PartialEq for Matrix<T> {
    /// Checks if matrices are exactly equal.
    ///
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.elements == other.elements
    }
}
impl<T: Scalar, const ROWS: usize, const COLUMNS: usize> PartialEq<[[T; COLUMNS]; ROWS]>
    for Matrix<T>
{
    /// Checks if matrix is exactly equal to the grid.
    ///
    fn eq(&self, other: &[[T; COLUMNS]; ROWS]) -> bool {
        self.size() == (ROWS, COLUMNS)
            && other
                .iter()
                .flatten()
                .zip(self.elements.iter())
                .all(|(a, b)| a == b)
    }
}
impl<T: Scalar> PartialEq<Vec<Vec<T>>> for Matrix<T> {
    /// Checks if matrix is exactly equal to the grid.
    ///
    fn eq(&self, other: &Vec<Vec<T>>) -> bool {
        self.rows == other.len()
            && other
                .iter()
                .enumerate()
                .all(|(r, row)| row.as_slice() == self.row(r))
    }
}
impl<T: Scalar> Hash for Matrix<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_code().hash(state);
    }
}
impl<T: Scalar> fmt::Display for Matrix<T> {
    /// Formats matrix as `[[a, b], [c, d]]`; formatter's precision is applied to every element.
    ///
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for r in 0..self.rows {
            if r > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (c, elem) in self.row(r).iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                fmt::Display::fmt(elem, f)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
impl<T: Scalar, const ROWS: usize, const COLUMNS: usize> From<[[T; COLUMNS]; ROWS]> for Matrix<T> {
    /// Constructs matrix from the grid.
    ///
    fn from(arr: [[T; COLUMNS]; ROWS]) -> Self {
        Matrix::from_parts(
            ROWS,
            COLUMNS,
            arr.iter().flatten().copied().collect(),
            None,
            None,
        )
    }
}
impl<T: Scalar + Serialize> Serialize for Matrix<T> {
    /// Serializes matrix as sequence of rows.
    ///
    /// Matrix without rows but with columns can't be represented by rows, so it is rejected.
    ///
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.rows == 0 && self.columns > 0 {
            return Err(ser::Error::custom(format!(
                "0x{} matrix has no rows to carry its columns count",
                self.columns
            )));
        }
        serializer.collect_seq(self.as_rows())
    }
}
impl<'de, T: Scalar + Deserialize<'de>> Deserialize<'de> for Matrix<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows: Vec<Vec<T>> = Vec::deserialize(deserializer)?;
        Matrix::from_rows(rows).map_err(de::Error::custom)
    }
}

// Operations are implemented on references, owned variants forward to them.
/// [`impl_matrix_operations`] macro implements fallible binary operations of matrices.
///
macro_rules! impl_matrix_operations {
    ($(($trait:ident, $method:ident, $lhs:ident, $rhs:ident, $output:ident, $function:ident),)+) => {$(
        impl<T: Scalar> $trait<&$rhs<T>> for &$lhs<T> {
            type Output = MathResult<$output<T>>;

            fn $method(self, rhs: &$rhs<T>) -> Self::Output {
                $function(self, rhs)
            }
        }
        impl<T: Scalar> $trait<$rhs<T>> for $lhs<T> {
            type Output = MathResult<$output<T>>;

            fn $method(self, rhs: $rhs<T>) -> Self::Output {
                $function(&self, &rhs)
            }
        }
    )+};
}
/// Adds matrices.
///
fn add_matrices<T: Scalar>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> MathResult<Matrix<T>> {
    lhs.checked_add(rhs)
}
/// Subtracts matrices.
///
fn sub_matrices<T: Scalar>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> MathResult<Matrix<T>> {
    lhs.checked_sub(rhs)
}
/// Multiplies matrices.
///
fn mul_matrices<T: Scalar>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> MathResult<Matrix<T>> {
    lhs.dot_product(rhs)
}
/// Multiplies matrix by column vector.
///
fn mul_matrix_vector<T: Scalar>(lhs: &Matrix<T>, rhs: &Vector<T>) -> MathResult<Vector<T>> {
    lhs.transform_vector(rhs)
}
/// Multiplies row vector by matrix.
///
fn mul_vector_matrix<T: Scalar>(lhs: &Vector<T>, rhs: &Matrix<T>) -> MathResult<Vector<T>> {
    rhs.transform_row_vector(lhs)
}
impl_matrix_operations!(
    (Add, add, Matrix, Matrix, Matrix, add_matrices),
    (Sub, sub, Matrix, Matrix, Matrix, sub_matrices),
    (Mul, mul, Matrix, Matrix, Matrix, mul_matrices),
    (Mul, mul, Matrix, Vector, Vector, mul_matrix_vector),
    (Mul, mul, Vector, Matrix, Vector, mul_vector_matrix),
);
/// [`impl_matrix_scalar_operations`] macro implements matrix-scalar operations.
///
macro_rules! impl_matrix_scalar_operations {
    ($(($trait:ident, $method:ident, $op:tt),)+) => {$(
        impl<T: Scalar> $trait<T> for &Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: T) -> Self::Output {
                self.map(|a| a $op rhs)
            }
        }
        impl<T: Scalar> $trait<T> for Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: T) -> Self::Output {
                self.map(|a| a $op rhs)
            }
        }
    )+};
}
impl_matrix_scalar_operations!((Mul, mul, *), (Div, div, /),);
impl<T: Scalar> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Self::Output {
        self.map(|a| -a)
    }
}
impl<T: Scalar> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Self::Output {
        self.map(|a| -a)
    }
}
