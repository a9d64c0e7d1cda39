//! `transforms` submodule implements factory of affine transformation matrices
//! (identity, diagonal, scaling, skew, rotation, translation and raw transform)
//! in homogeneous (normal space) coordinates and [`Transform`] enum that describes them.
//!
//! Transformation of `n`-dimensional space is `(n + 1)x(n + 1)` matrix which is applied
//! to a row vector (`p · M`, see [`Matrix::apply_to`]), so translation is stored in the last row
//! and composition `A -> B` is `A · B`.
//!

use crate::{
    errors::{MathError, MathResult},
    floats::Scalar,
    matrices::Matrix,
    Structure,
};
use serde::{Deserialize, Serialize};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{OnceLock, PoisonError, RwLock},
};

/// Cache of identity matrices that is keyed by scalar type and dimension.
///
type IdentityCache = RwLock<HashMap<(TypeId, usize), Box<dyn Any + Send + Sync>>>;
/// Process-wide identity cache.
///
static IDENTITIES: OnceLock<IdentityCache> = OnceLock::new();

/// Returns base dimension `k >= 2` for which `formula(k)` equals `count`.
///
fn base_dimension(count: usize, formula: impl Fn(usize) -> usize) -> Option<usize> {
    (2..)
        .map(|k| (k, formula(k)))
        .take_while(|&(_, expected)| expected <= count)
        .find(|&(_, expected)| expected == count)
        .map(|(k, _)| k)
}

impl<T: Scalar> Matrix<T> {
    /// Returns identity matrix of given dimension.
    ///
    /// Identity matrices are memoized in a process-wide cache, every call returns an independent copy
    /// with precomputed structure and determinant.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// let identity: Matrix<f64> = Matrix::identity(2);
    /// assert_eq!(identity, [[1.0, 0.0], [0.0, 1.0]]);
    /// assert!(identity.is_identity());
    /// assert_eq!(identity.determinant(), Ok(1.0));
    /// ```
    ///
    pub fn identity(dimension: usize) -> Self {
        let cache: &IdentityCache = IDENTITIES.get_or_init(Default::default);
        let key: (TypeId, usize) = (TypeId::of::<T>(), dimension);
        {
            let identities = cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(identity) = identities
                .get(&key)
                .and_then(|identity| identity.downcast_ref::<Matrix<T>>())
            {
                return identity.clone();
            }
        }

        log::debug!("identity cache miss for dimension {dimension}");
        let identity: Matrix<T> = Matrix::diagonal(&vec![T::one(); dimension]);
        let cached: Box<dyn Any + Send + Sync> = Box::new(identity.clone());
        let _ = cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(cached);
        identity
    }
    /// Constructs diagonal matrix from given values.
    ///
    /// Structure and determinant are derived from values without scanning.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// let matrix: Matrix<f64> = Matrix::diagonal(&[2.0, 3.0]);
    /// assert_eq!(matrix, [[2.0, 0.0], [0.0, 3.0]]);
    /// assert!(matrix.is_diagonalized() && !matrix.is_identity());
    /// assert_eq!(matrix.determinant(), Ok(6.0));
    /// ```
    ///
    pub fn diagonal(values: &[T]) -> Self {
        let n: usize = values.len();
        let mut elements: Vec<T> = vec![T::zero(); n * n];
        for (k, &value) in values.iter().enumerate() {
            elements[k * n + k] = value;
        }

        let mut structure: Structure = Structure::DIAGONAL;
        if values.iter().all(|&value| value == T::one()) {
            structure |= Structure::UNIT_DIAGONAL;
        }
        let determinant: T = values.iter().fold(T::one(), |acc, &value| acc * value);
        Matrix::from_parts(n, n, elements, Some(structure), Some(determinant))
    }

    /// Constructs scaling matrix of `coefficients.len()`-dimensional space.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::{matrices::Matrix, vectors::Vector};
    /// let scaling: Matrix<f64> = Matrix::scaling(&[3.0, 2.0]);
    /// assert_eq!(scaling, [[3.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 1.0]]);
    /// let point: Vector<f64> = Vector::new([2.0, 2.0]).expect("Vector is not empty.");
    /// assert_eq!(scaling.apply_to(&point), Ok(Vector::new([6.0, 4.0]).expect("Vector is not empty.")));
    /// ```
    ///
    pub fn scaling(coefficients: &[T]) -> Self {
        let mut values: Vec<T> = coefficients.to_vec();
        values.push(T::one());
        Matrix::diagonal(&values)
    }
    /// Constructs translation matrix of `values.len()`-dimensional space.
    ///
    /// Translation is stored in the leading elements of the last row.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// let translation: Matrix<f64> = Matrix::translation(&[2.0, 3.0]);
    /// assert_eq!(translation, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [2.0, 3.0, 1.0]]);
    /// assert_eq!(translation.determinant(), Ok(1.0));
    /// ```
    ///
    pub fn translation(values: &[T]) -> Self {
        let n: usize = values.len();
        let mut matrix: Matrix<T> = Matrix::identity(n + 1);
        for (c, &value) in values.iter().enumerate() {
            matrix.set(n, c, value);
        }
        matrix
    }
    /// Constructs skew (shear) matrix of `k`-dimensional space from `k·(k - 1)` angles.
    ///
    /// Off-diagonal elements of the top-left `k`x`k` block are filled row by row with tangents of angles.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if angles count is not `k·(k - 1)` for any `k >= 2`.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// let skew: Matrix<f64> = Matrix::skew(&[0.0, 0.0]).expect("Angles count is correct.");
    /// assert!(skew.is_identity());
    /// assert!(Matrix::<f64>::skew(&[0.0; 3]).is_err());
    /// ```
    ///
    pub fn skew(angles: &[T]) -> MathResult<Self> {
        let k: usize = base_dimension(angles.len(), |k| k * (k - 1)).ok_or_else(|| {
            MathError::InvalidArgument(format!(
                "{} angles can't describe skew, k*(k-1) angles are required",
                angles.len()
            ))
        })?;

        let mut matrix: Matrix<T> = Matrix::identity(k + 1);
        let positions = (0..k).flat_map(|r| (0..k).filter(move |&c| c != r).map(move |c| (r, c)));
        for ((r, c), &angle) in positions.zip(angles.iter()) {
            matrix.set(r, c, angle.tan());
        }
        Ok(matrix)
    }
    /// Constructs rotation matrix of `k`-dimensional space from `k·(k - 1) / 2` angles.
    ///
    /// Every pair of axes `(d1, d2)` with `d1 < d2` consumes one angle in order
    /// (outer iteration over `d1`, inner over `d2`); elementary rotations are composed in the same order.
    /// Positive angle turns axis `d1` towards axis `d2`.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if angles count is not `k·(k - 1) / 2` for any `k >= 2`.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::{floats::FloatOperations, matrices::Matrix, vectors::Vector};
    /// let rotation: Matrix<f64> = Matrix::rotation(&[std::f64::consts::FRAC_PI_2])
    ///     .expect("Angles count is correct.");
    /// let point: Vector<f64> = Vector::new([0.0, 2.0]).expect("Vector is not empty.");
    /// let rotated: Vector<f64> = rotation.apply_to(&point).expect("Dimensions are correct.");
    /// assert_eq!(rotated.correct_to(0).components(), &[-2.0, 0.0]);
    /// ```
    ///
    pub fn rotation(angles: &[T]) -> MathResult<Self> {
        let k: usize = base_dimension(angles.len(), |k| k * (k - 1) / 2).ok_or_else(|| {
            MathError::InvalidArgument(format!(
                "{} angles can't describe rotation, k*(k-1)/2 angles are required",
                angles.len()
            ))
        })?;

        let identity: Matrix<T> = Matrix::identity(k + 1);
        let mut composite: Matrix<T> = identity.clone();
        let planes = (0..k).flat_map(|d1| ((d1 + 1)..k).map(move |d2| (d1, d2)));
        for ((d1, d2), &angle) in planes.zip(angles.iter()) {
            let (sin, cos): (T, T) = angle.sin_cos();
            let mut rotation: Matrix<T> = identity.clone();
            rotation.set(d1, d1, cos);
            rotation.set(d1, d2, sin);
            rotation.set(d2, d1, -sin);
            rotation.set(d2, d2, cos);
            composite = composite.dot_product(&rotation)?;
        }
        Ok(composite)
    }
    /// Constructs raw affine transformation matrix of dimension `n` from `n·(n - 1)` values.
    ///
    /// Values are filled row by row into the first `n - 1` columns, last column stays `[0, ..., 0, 1]`.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if values count is not `n·(n - 1)` for any `n >= 2`.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::matrices::Matrix;
    /// let matrix: Matrix<f64> = Matrix::transform(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
    ///     .expect("Values count is correct.");
    /// assert_eq!(matrix, [[1.0, 2.0, 0.0], [3.0, 4.0, 0.0], [5.0, 6.0, 1.0]]);
    /// ```
    ///
    pub fn transform(values: &[T]) -> MathResult<Self> {
        let n: usize = base_dimension(values.len(), |n| n * (n - 1)).ok_or_else(|| {
            MathError::InvalidArgument(format!(
                "{} values can't describe affine transform, n*(n-1) values are required",
                values.len()
            ))
        })?;

        let mut matrix: Matrix<T> = Matrix::identity(n);
        for (i, &value) in values.iter().enumerate() {
            matrix.set(i / (n - 1), i % (n - 1), value);
        }
        Ok(matrix)
    }
}

/// [`Transform`] struct-like enum represents basic affine transformations.
///
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Transform<T> {
    /// Translation moves an object along given vector.
    ///
    Translation {
        /// Vector along which object will be translated.
        ///
        vector: Vec<T>,
    },

    /// Rotation turns an object in every plane of axes pair.
    ///
    Rotation {
        /// Angles (in radians) for every pair of axes.
        ///
        angles: Vec<T>,
    },

    /// Scaling changes the size of an object along axes.
    ///
    Scaling {
        /// Scaling coefficient for every axis.
        ///
        coefficients: Vec<T>,
    },

    /// Skew shears an object.
    ///
    Skew {
        /// Angles (in radians) for every off-diagonal element.
        ///
        angles: Vec<T>,
    },
}
impl<T: Scalar> Transform<T> {
    /// Constructs corresponding transformation matrix.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if rotation or skew angles count is incorrect.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::{matrices::Matrix, transforms::Transform, vectors::Vector};
    /// let transform: Transform<f64> = Transform::Translation { vector: vec![2.0, 3.0] };
    /// let matrix: Matrix<f64> = transform.matrix().expect("Transform is correct.");
    /// let point: Vector<f64> = Vector::new([0.0, 2.0]).expect("Vector is not empty.");
    /// assert_eq!(matrix.apply_to(&point), Ok(Vector::new([2.0, 5.0]).expect("Vector is not empty.")));
    /// ```
    ///
    pub fn matrix(&self) -> MathResult<Matrix<T>> {
        match self {
            Self::Translation { vector } => Ok(Matrix::translation(vector)),
            Self::Rotation { angles } => Matrix::rotation(angles),
            Self::Scaling { coefficients } => Ok(Matrix::scaling(coefficients)),
            Self::Skew { angles } => Matrix::skew(angles),
        }
    }

    /// Combines given transforms by using dot product.
    ///
    /// Transforms are applied in the given order, so combining `A -> B -> C`
    /// results in `A · B · C`.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if no transforms were given or if any of them is incorrect and
    /// [`MathError::DimensionMismatch`] if transforms are of different dimensions.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::{floats::FloatOperations, transforms::Transform, vectors::Vector};
    /// let rotation: Transform<f64> = Transform::Rotation { angles: vec![std::f64::consts::FRAC_PI_2] };
    /// let translation: Transform<f64> = Transform::Translation { vector: vec![3.0, 2.0] };
    /// let scaling: Transform<f64> = Transform::Scaling { coefficients: vec![2.0, 2.0] };
    ///
    /// let matrix = Transform::combine(&[rotation, translation, scaling]).expect("Transforms are correct.");
    /// let point: Vector<f64> = Vector::new([1.0, 0.0]).expect("Vector is not empty.");
    /// let transformed: Vector<f64> = matrix.apply_to(&point).expect("Dimensions are correct.");
    /// assert_eq!(transformed.correct_to(0).components(), &[6.0, 6.0]);  // rotation -> translation -> scaling
    /// ```
    ///
    pub fn combine<'a>(transforms: impl IntoIterator<Item = &'a Transform<T>>) -> MathResult<Matrix<T>> {
        let mut transforms = transforms.into_iter();
        let first: &Transform<T> = transforms.next().ok_or_else(|| {
            MathError::InvalidArgument(String::from("at least one transform is required"))
        })?;
        transforms.try_fold(first.matrix()?, |acc, transform| {
            acc.dot_product(&transform.matrix()?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Transform;
    use crate::{
        errors::MathError,
        floats::FloatOperations,
        matrices::Matrix,
        vectors::Vector,
    };
    use std::{
        f64::consts::{FRAC_PI_2, FRAC_PI_4},
        thread,
    };

    fn vector(components: &[f64]) -> Vector<f64> {
        Vector::new(components).expect("Vector is not empty.")
    }

    #[test]
    fn identity() {
        let mut m1: Matrix<f64> = Matrix::identity(3);
        let m2: Matrix<f64> = Matrix::identity(3);
        assert_eq!(m1, m2);
        assert!(!std::ptr::eq(m1.elements().as_ptr(), m2.elements().as_ptr()));

        m1.set(0, 0, 5.0);
        assert!(!m1.is_identity());
        assert_eq!(
            Matrix::<f64>::identity(3),
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        );
        assert!(Matrix::<f64>::identity(3).is_identity());

        let identity32: Matrix<f32> = Matrix::identity(2);
        assert_eq!(identity32, [[1.0_f32, 0.0], [0.0, 1.0]]);
        assert_eq!(Matrix::<f64>::identity(0).size(), (0, 0));

        let matrix: Matrix<f64> = Matrix::from([[1.0, 2.0], [3.0, 4.0]]);
        let identity: Matrix<f64> = Matrix::identity(2);
        assert_eq!(&identity * &matrix, Ok(matrix.clone()));
        assert_eq!(&matrix * &identity, Ok(matrix.clone()));
        for n in 1..6 {
            assert_eq!(Matrix::<f64>::identity(n).determinant(), Ok(1.0));
        }
    }

    #[test]
    fn concurrent_identity() {
        let handles: Vec<thread::JoinHandle<Matrix<f64>>> = (0..8)
            .map(|_| thread::spawn(|| Matrix::identity(7)))
            .collect();
        for handle in handles {
            let identity: Matrix<f64> = handle.join().expect("Thread should not panic.");
            assert!(identity.is_identity());
            assert_eq!(identity.size(), (7, 7));
        }
    }

    #[test]
    fn diagonal_and_scaling() {
        let diagonal: Matrix<f64> = Matrix::diagonal(&[1.0, 1.0]);
        assert!(diagonal.is_identity());
        assert_eq!(Matrix::diagonal(&[2.0, 0.5, 4.0]).determinant(), Ok(4.0));

        let scaling: Matrix<f64> = Matrix::scaling(&[2.0, 3.0]);
        assert_eq!(scaling, [[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(scaling.is_normal_space());
        assert_eq!(scaling.apply_to(&vector(&[1.0, 1.0])), Ok(vector(&[2.0, 3.0])));
        assert!(matches!(
            scaling.apply_to(&vector(&[1.0])),
            Err(MathError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn translation() {
        let translation: Matrix<f64> = Matrix::translation(&[2.0, -3.0, 1.0]);
        assert_eq!(translation.size(), (4, 4));
        assert_eq!(translation.row(3), &[2.0, -3.0, 1.0, 1.0]);
        assert!(!translation.is_normal_space());
        assert_eq!(
            translation.apply_to(&vector(&[1.0, 1.0, 1.0])),
            Ok(vector(&[3.0, -2.0, 2.0]))
        );
        assert_eq!(translation.determinant(), Ok(1.0));
    }

    #[test]
    fn rotation() {
        let rotation: Matrix<f64> = Matrix::rotation(&[FRAC_PI_2]).expect("Angles count is correct.");
        assert_eq!(
            rotation.clone().correct_to(0),
            [[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]
        );
        assert_eq!(
            rotation
                .apply_to(&vector(&[1.0, 0.0]))
                .expect("Dimensions are correct.")
                .correct_to(0),
            vector(&[0.0, 1.0])
        );

        let rotation: Matrix<f64> =
            Matrix::rotation(&[0.0, 0.0, FRAC_PI_2]).expect("Angles count is correct.");
        assert_eq!(rotation.size(), (4, 4));
        assert_eq!(
            rotation
                .apply_to(&vector(&[0.0, 1.0, 0.0]))
                .expect("Dimensions are correct.")
                .correct_to(0),
            vector(&[0.0, 0.0, 1.0])
        );

        let rotation: Matrix<f64> =
            Matrix::rotation(&[0.3, -1.2, 2.5]).expect("Angles count is correct.");
        let determinant: f64 = rotation.determinant().expect("Matrix is square.");
        assert!((determinant - 1.0).abs() < 1e-9);
        let inverse: Matrix<f64> = rotation.invert().expect("Rotation is not singular.");
        assert!(inverse.almost_equal(&rotation.transpose(), 1e-9));

        let plane = |d1: usize, d2: usize, angle: f64| {
            let (sin, cos): (f64, f64) = angle.sin_cos();
            let mut elements: [[f64; 4]; 4] = [[0.0; 4]; 4];
            for (k, row) in elements.iter_mut().enumerate() {
                row[k] = 1.0;
            }
            elements[d1][d1] = cos;
            elements[d1][d2] = sin;
            elements[d2][d1] = -sin;
            elements[d2][d2] = cos;
            Matrix::from(elements)
        };
        let (r01, r02, r12): (Matrix<f64>, Matrix<f64>, Matrix<f64>) =
            (plane(0, 1, 0.3), plane(0, 2, -1.2), plane(1, 2, 2.5));
        let ordered: Matrix<f64> = (&(&r01 * &r02).expect("Matrices are square.") * &r12)
            .expect("Matrices are square.");
        let reversed: Matrix<f64> = (&(&r12 * &r02).expect("Matrices are square.") * &r01)
            .expect("Matrices are square.");
        assert!(rotation.almost_equal(&ordered, 1e-12));
        assert!(!rotation.almost_equal(&reversed, 1e-6));

        let rotation: Matrix<f64> = Matrix::rotation(&[0.1; 6]).expect("Angles count is correct.");
        assert_eq!(rotation.size(), (5, 5));

        assert!(matches!(
            Matrix::<f64>::rotation(&[0.1, 0.2]),
            Err(MathError::InvalidArgument(_))
        ));
        assert!(matches!(
            Matrix::<f64>::rotation(&[]),
            Err(MathError::InvalidArgument(_))
        ));
    }

    #[test]
    fn skew() {
        let skew: Matrix<f64> = Matrix::skew(&[FRAC_PI_4, 0.0]).expect("Angles count is correct.");
        assert!(skew.almost_equal(
            &Matrix::from([[1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]),
            1e-12
        ));

        let skew: Matrix<f64> =
            Matrix::skew(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).expect("Angles count is correct.");
        assert_eq!(skew.size(), (4, 4));
        assert_eq!(
            skew,
            [
                [1.0, 0.1_f64.tan(), 0.2_f64.tan(), 0.0],
                [0.3_f64.tan(), 1.0, 0.4_f64.tan(), 0.0],
                [0.5_f64.tan(), 0.6_f64.tan(), 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]
        );
        assert!(matches!(
            Matrix::<f64>::skew(&[0.0; 4]),
            Err(MathError::InvalidArgument(_))
        ));
    }

    #[test]
    fn raw_transform() {
        let matrix: Matrix<f64> = Matrix::transform(&[2.0, 7.0]).expect("Values count is correct.");
        assert_eq!(matrix, [[2.0, 0.0], [7.0, 1.0]]);
        assert!(!matrix.is_normal_space());
        let matrix: Matrix<f64> = Matrix::transform(&[2.0, 0.0]).expect("Values count is correct.");
        assert!(matrix.is_normal_space());
        let matrix: Matrix<f64> = Matrix::transform(&[2.0, 7.0]).expect("Values count is correct.");
        assert_eq!(matrix.apply_to(&vector(&[3.0])), Ok(vector(&[13.0])));

        let matrix: Matrix<f64> = Matrix::transform(&[1.0; 12]).expect("Values count is correct.");
        assert_eq!(matrix.size(), (4, 4));
        assert_eq!(matrix.row(3), &[1.0; 4]);
        assert!(!matrix.is_normal_space());
        assert!(matches!(
            Matrix::<f64>::transform(&[1.0; 5]),
            Err(MathError::InvalidArgument(_))
        ));
    }

    #[test]
    fn combination() {
        let transforms: Vec<Transform<f64>> = vec![
            Transform::Scaling {
                coefficients: vec![2.0, 2.0],
            },
            Transform::Translation {
                vector: vec![1.0, 0.0],
            },
        ];
        let matrix: Matrix<f64> = Transform::combine(&transforms).expect("Transforms are correct.");
        assert_eq!(matrix.apply_to(&vector(&[1.0, 1.0])), Ok(vector(&[3.0, 2.0])));

        let reversed: Matrix<f64> =
            Transform::combine(transforms.iter().rev()).expect("Transforms are correct.");
        assert_eq!(reversed.apply_to(&vector(&[1.0, 1.0])), Ok(vector(&[4.0, 2.0])));

        assert!(matches!(
            Transform::<f64>::combine(&[]),
            Err(MathError::InvalidArgument(_))
        ));
        assert!(matches!(
            Transform::combine(&[
                Transform::Scaling {
                    coefficients: vec![1.0],
                },
                Transform::Scaling {
                    coefficients: vec![1.0, 1.0],
                },
            ]),
            Err(MathError::DimensionMismatch { .. })
        ));
        assert!(Transform::Skew { angles: vec![0.0] }.matrix().is_err());
    }

    #[test]
    fn serialization() {
        let transform: Transform<f64> = Transform::Rotation {
            angles: vec![0.5, 1.0, 1.5],
        };
        let bytes: Vec<u8> = serde_cbor::to_vec(&transform).expect("Transform is serializable.");
        let restored: Transform<f64> = serde_cbor::from_slice(&bytes).expect("Bytes are valid.");
        assert_eq!(restored, transform);
    }
}
