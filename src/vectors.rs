//! `vectors` submodule implements N-dimensional vectors which can be used to represent
//! points, directions and coordinates of any dimension.
//!
//! Dimension of a vector is fixed at construction and can't be zero.
//! Vectors are immutable, every operation returns new vector.
//!

use crate::{
    errors::{ensure_dimension, MathError, MathResult},
    floats::{almost_equal, hash_scalar, FloatOperations, Scalar},
    Sign,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    collections::HashMap,
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, Div, Index, Mul, Neg, Sub},
    slice::Iter,
    sync::OnceLock,
};

/// [`Vector`] struct represents N-dimensional vector (or point) with scalar components.
///
/// Its Euclidean norm is computed lazily and cached.
///
/// Equality of vectors is exact (component-wise `==`), so round-off of previous
/// operations can make mathematically equal vectors unequal;
/// [`Vector::almost_equal`] should be used for tolerant comparison.
///
/// # Example
/// ```rust
/// # use linmath::vectors::Vector;
/// let v: Vector<f64> = Vector::new([3.0, 4.0]).expect("Vector is not empty.");
/// let w: Vector<f64> = Vector::new([1.0, 1.0]).expect("Vector is not empty.");
/// assert_eq!(v.norm(), 5.0);
/// assert_eq!((&v + &w).expect("Dimensions are equal."), Vector::new([4.0, 5.0]).expect("Vector is not empty."));
/// assert_eq!((&v * &w).expect("Dimensions are equal."), 7.0);
/// ```
///
#[derive(Clone, Debug)]
pub struct Vector<T> {
    /// Components of vector.
    ///
    components: Vec<T>,
    /// Cached Euclidean norm.
    ///
    norm: OnceLock<T>,
}
impl<T: Scalar> Vector<T> {
    /// Constructs vector from given components.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if no components were given.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::vectors::Vector;
    /// let v: Vector<f32> = Vector::new(vec![1.0, 2.0, 3.0]).expect("Vector is not empty.");
    /// assert_eq!(v.dimension(), 3);
    /// assert!(Vector::<f32>::new(vec![]).is_err());
    /// ```
    ///
    pub fn new(components: impl Into<Vec<T>>) -> MathResult<Self> {
        let components: Vec<T> = components.into();
        if components.is_empty() {
            return Err(MathError::InvalidArgument(String::from(
                "vector must have at least one component",
            )));
        }
        Ok(Self::from_components(components))
    }
    /// Constructs vector from components that are known to be non-empty.
    ///
    pub(crate) fn from_components(components: Vec<T>) -> Self {
        debug_assert!(!components.is_empty());
        Self {
            components,
            norm: OnceLock::new(),
        }
    }

    /// Returns dimension of vector.
    ///
    pub fn dimension(&self) -> usize {
        self.components.len()
    }
    /// Returns components of vector.
    ///
    pub fn components(&self) -> &[T] {
        &self.components
    }
    /// Returns iterator over components of vector.
    ///
    pub fn iter(&self) -> Iter<'_, T> {
        self.components.iter()
    }
    /// Consumes vector and returns its components.
    ///
    pub fn into_components(self) -> Vec<T> {
        self.components
    }
    /// Returns component by its index.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if index is out of `[0, dimension)`.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::vectors::Vector;
    /// let v: Vector<f64> = Vector::new([1.0, 2.0]).expect("Vector is not empty.");
    /// assert_eq!(v.get(1), Ok(2.0));
    /// assert!(v.get(2).is_err());
    /// ```
    ///
    pub fn get(&self, index: usize) -> MathResult<T> {
        self.components.get(index).copied().ok_or_else(|| {
            MathError::InvalidArgument(format!(
                "index {index} is out of bounds for vector of dimension {}",
                self.dimension()
            ))
        })
    }

    /// Applies function to every vector component and returns changed vector.
    ///
    pub fn map(&self, f: impl Fn(T) -> T) -> Self {
        Self::from_components(self.components.iter().map(|&elem| f(elem)).collect())
    }
    /// Combines vectors by applying function on their components.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if dimensions are not equal.
    ///
    pub fn combine(&self, other: &Self, f: impl Fn(T, T) -> T) -> MathResult<Self> {
        ensure_dimension(self.dimension(), other.dimension())?;
        Ok(Self::from_components(
            self.iter()
                .zip(other.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        ))
    }

    /// Adds vectors component-wise.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if dimensions are not equal.
    ///
    pub fn checked_add(&self, other: &Self) -> MathResult<Self> {
        self.combine(other, |a, b| a + b)
    }
    /// Subtracts vectors component-wise.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if dimensions are not equal.
    ///
    pub fn checked_sub(&self, other: &Self) -> MathResult<Self> {
        self.combine(other, |a, b| a - b)
    }

    /// Returns squared Euclidean norm of a vector.
    ///
    pub fn sqr_norm(&self) -> T {
        self.iter().fold(T::zero(), |acc, &n| acc + n * n)
    }
    /// Returns Euclidean norm of a vector (its length).
    ///
    /// Norm is computed once and then cached.
    ///
    pub fn norm(&self) -> T {
        *self.norm.get_or_init(|| self.sqr_norm().sqrt())
    }
    /// Returns new vector that is scaled by `1 / norm`.
    ///
    /// Normalizing zero vector yields non-finite components, callers are expected to guard against it.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::vectors::Vector;
    /// let v: Vector<f64> = Vector::new([3.0, 4.0]).expect("Vector is not empty.");
    /// assert_eq!(v.normalize().components(), &[0.6, 0.8]);
    /// ```
    ///
    pub fn normalize(&self) -> Self {
        self / self.norm()
    }

    /// Performs dot product operation on two vectors.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if dimensions are not equal.
    ///
    pub fn dot(&self, other: &Self) -> MathResult<T> {
        ensure_dimension(self.dimension(), other.dimension())?;
        Ok(self
            .iter()
            .zip(other.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b))
    }
    /// Returns angle (in radians) between two vectors.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`] if dimensions are not equal.
    ///
    pub fn angle(&self, other: &Self) -> MathResult<T> {
        let cos: T = self.dot(other)? / (self.norm() * other.norm());
        Ok(cos.max(-T::one()).min(T::one()).acos())
    }

    /// Checks whether vectors are equal with given tolerance.
    ///
    /// Vectors of different dimensions are never equal.
    ///
    pub fn almost_equal(&self, other: &Self, epsilon: T) -> bool {
        self.dimension() == other.dimension()
            && self
                .iter()
                .zip(other.iter())
                .all(|(&a, &b)| almost_equal(a, b, epsilon))
    }

    /// Converts vector to normal space (homogeneous coordinates) by appending trailing `1` component.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::vectors::Vector;
    /// let v: Vector<f64> = Vector::new([2.0, 3.0]).expect("Vector is not empty.");
    /// assert_eq!(v.to_normal_space().components(), &[2.0, 3.0, 1.0]);
    /// ```
    ///
    pub fn to_normal_space(&self) -> Self {
        let mut components: Vec<T> = Vec::with_capacity(self.dimension() + 1);
        components.extend_from_slice(&self.components);
        components.push(T::one());
        Self::from_components(components)
    }
    /// Converts vector from normal space by removing its trailing component.
    ///
    /// If trailing component is not `1`, vector is divided by it first (perspective divide).
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if vector has only one component.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::vectors::Vector;
    /// let v: Vector<f64> = Vector::new([4.0, 6.0, 2.0]).expect("Vector is not empty.");
    /// assert_eq!(v.from_normal_space().expect("Dimension is greater than 1.").components(), &[2.0, 3.0]);
    /// ```
    ///
    pub fn from_normal_space(&self) -> MathResult<Self> {
        let (&last, leading): (&T, &[T]) = self.components.split_last().ok_or_else(|| {
            MathError::InvalidArgument(String::from("vector must have at least one component"))
        })?;
        if leading.is_empty() {
            return Err(MathError::InvalidArgument(String::from(
                "vector of dimension 1 has no normal space projection",
            )));
        }
        let components: Vec<T> = if last == T::one() {
            leading.to_vec()
        } else {
            leading.iter().map(|&elem| elem / last).collect()
        };
        Ok(Self::from_components(components))
    }

    /// Returns generalized cross product of `n - 1` vectors of dimension `n`.
    ///
    /// Resulting vector is orthogonal to every given vector. It is a formal determinant
    /// of matrix whose rows are given vectors followed by basis vectors row,
    /// which is expanded in cofactors over column subsets.
    /// For `n = 3` it is the usual cross product, for `n = 2` it rotates the only vector by 90 degrees counterclockwise.
    ///
    /// Complexity grows exponentially with dimension, so it is suitable only for small `n`.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if no vectors were given and
    /// [`MathError::DimensionMismatch`] if any vector's dimension is not `vectors.len() + 1`.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::vectors::Vector;
    /// let x: Vector<f64> = Vector::new([1.0, 0.0, 0.0]).expect("Vector is not empty.");
    /// let y: Vector<f64> = Vector::new([0.0, 1.0, 0.0]).expect("Vector is not empty.");
    /// let z: Vector<f64> = Vector::product(&[x, y]).expect("Dimensions are correct.");
    /// assert_eq!(z.components(), &[0.0, 0.0, 1.0]);
    /// ```
    ///
    pub fn product(vectors: &[Vector<T>]) -> MathResult<Self> {
        if vectors.is_empty() {
            return Err(MathError::InvalidArgument(String::from(
                "generalized cross product requires at least one vector",
            )));
        }
        let dimension: usize = vectors.len() + 1;
        if dimension > u64::BITS as usize {
            return Err(MathError::InvalidArgument(format!(
                "generalized cross product is not supported in {dimension} dimensions"
            )));
        }
        for vector in vectors {
            ensure_dimension(dimension, vector.dimension())?;
        }

        let all_columns: u64 = u64::MAX >> (u64::BITS as usize - dimension);
        let mut minors: HashMap<u64, T> = HashMap::new();
        let mut sign: Sign = if (dimension - 1) % 2 == 0 {
            Sign::Positive
        } else {
            Sign::Negative
        };
        let mut components: Vec<T> = Vec::with_capacity(dimension);
        for column in 0..dimension {
            let minor: T = Self::minor(vectors, all_columns & !(1_u64 << column), &mut minors);
            components.push(sign.apply_to(minor));
            sign = -sign;
        }
        Ok(Self::from_components(components))
    }
    /// Computes determinant of a minor that consists of last `columns.count_ones()` rows and
    /// columns from given set by cofactor expansion along its first row.
    ///
    /// Minors are memoized by their column set.
    ///
    fn minor(rows: &[Vector<T>], columns: u64, minors: &mut HashMap<u64, T>) -> T {
        let count: usize = columns.count_ones() as usize;
        if count == 0 {
            return T::one();
        }
        if let Some(&minor) = minors.get(&columns) {
            return minor;
        }

        let row: &Vector<T> = &rows[rows.len() - count];
        let mut sign: Sign = Sign::Positive;
        let mut determinant: T = T::zero();
        for column in (0..row.dimension()).filter(|&column| columns & (1_u64 << column) != 0) {
            let cofactor: T = Self::minor(rows, columns & !(1_u64 << column), minors);
            determinant = determinant + sign.apply_to(row[column] * cofactor);
            sign = -sign;
        }
        let _ = minors.insert(columns, determinant);
        determinant
    }

    /// Returns barycenter (arithmetic mean) of given points and their count as total weight.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if no points were given and
    /// [`MathError::DimensionMismatch`] if points' dimensions differ.
    ///
    /// # Example
    /// ```rust
    /// # use linmath::vectors::Vector;
    /// let points: Vec<Vector<f64>> = vec![
    ///     Vector::new([0.0, 0.0]).expect("Vector is not empty."),
    ///     Vector::new([2.0, 0.0]).expect("Vector is not empty."),
    ///     Vector::new([1.0, 3.0]).expect("Vector is not empty."),
    /// ];
    /// let (weight, center) = Vector::barycenter(&points).expect("Dimensions are equal.");
    /// assert_eq!(weight, 3.0);
    /// assert_eq!(center.components(), &[1.0, 1.0]);
    /// ```
    ///
    pub fn barycenter(points: &[Vector<T>]) -> MathResult<(T, Self)> {
        Self::accumulate_barycenter(points.iter().map(|point| (point, T::one())))
    }
    /// Returns weighted barycenter of given points and their total weight.
    ///
    /// Zero total weight yields non-finite components.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] if no points were given and
    /// [`MathError::DimensionMismatch`] if points' dimensions differ.
    ///
    pub fn weighted_barycenter(points: &[(Vector<T>, T)]) -> MathResult<(T, Self)> {
        Self::accumulate_barycenter(points.iter().map(|(point, weight)| (point, *weight)))
    }
    /// Sums weighted points and divides the sum by total weight.
    ///
    fn accumulate_barycenter<'a>(
        mut points: impl Iterator<Item = (&'a Vector<T>, T)>,
    ) -> MathResult<(T, Self)> {
        let (first, first_weight): (&Vector<T>, T) = points.next().ok_or_else(|| {
            MathError::InvalidArgument(String::from("barycenter requires at least one point"))
        })?;
        let mut sum: Vec<T> = first.iter().map(|&elem| elem * first_weight).collect();
        let mut total: T = first_weight;
        for (point, weight) in points {
            ensure_dimension(sum.len(), point.dimension())?;
            sum.iter_mut()
                .zip(point.iter())
                .for_each(|(acc, &elem)| *acc = *acc + elem * weight);
            total = total + weight;
        }
        Ok((
            total,
            Self::from_components(sum.into_iter().map(|elem| elem / total).collect()),
        ))
    }
}
impl<T: Scalar> FloatOperations for Vector<T> {
    /// Constructs new vector by correcting every vector component that may be wronged by float operations.
    ///
    fn correct_to(self, digits: i32) -> Self {
        self.map(|elem| elem.correct_to(digits))
    }
    /// Constructs new vector by rounding every vector component to given amount of digits after floating point.
    ///
    fn round_up_to(self, digits: i32) -> Self {
        self.map(|elem| elem.round_up_to(digits))
    }
}
impl<T: Scalar> Index<usize> for Vector<T> {
    type Output = T;

    /// Returns component by its index.
    ///
    /// Panics if index is out of bounds, [`Vector::get`] is the checked alternative.
    ///
    fn index(&self, index: usize) -> &Self::Output {
        &self.components[index]
    }
}
impl<T: Scalar> PartialEq for Vector<T> {
    /// Checks if vectors are exactly equal.
    ///
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}
impl<T: Scalar> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimension().hash(state);
        self.iter().for_each(|&elem| hash_scalar(elem, state));
    }
}
impl<T: Scalar> fmt::Display for Vector<T> {
    /// Formats vector as `(x, y, ...)`; formatter's precision is applied to every component.
    ///
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, elem) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            fmt::Display::fmt(elem, f)?;
        }
        write!(f, ")")
    }
}
impl<T: Scalar> TryFrom<Vec<T>> for Vector<T> {
    type Error = MathError;

    fn try_from(components: Vec<T>) -> Result<Self, Self::Error> {
        Vector::new(components)
    }
}
impl<T: Scalar, const N: usize> TryFrom<[T; N]> for Vector<T> {
    type Error = MathError;

    fn try_from(components: [T; N]) -> Result<Self, Self::Error> {
        Vector::new(components)
    }
}
impl<T: Scalar + Serialize> Serialize for Vector<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.components.serialize(serializer)
    }
}
impl<'de, T: Scalar + Deserialize<'de>> Deserialize<'de> for Vector<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let components: Vec<T> = Vec::deserialize(deserializer)?;
        Vector::new(components).map_err(de::Error::custom)
    }
}

// Operations are implemented on references, owned variants forward to them.
/// [`impl_vector_vector_operations`] macro implements fallible vector-vector operations.
///
macro_rules! impl_vector_vector_operations {
    ($(($trait:ident, $method:ident, $output:ty, $function:ident),)+) => {$(
        impl<T: Scalar> $trait<&Vector<T>> for &Vector<T> {
            type Output = MathResult<$output>;

            fn $method(self, rhs: &Vector<T>) -> Self::Output {
                self.$function(rhs)
            }
        }
        impl<T: Scalar> $trait<Vector<T>> for Vector<T> {
            type Output = MathResult<$output>;

            fn $method(self, rhs: Vector<T>) -> Self::Output {
                self.$function(&rhs)
            }
        }
    )+};
}
impl_vector_vector_operations!(
    (Add, add, Vector<T>, checked_add),
    (Sub, sub, Vector<T>, checked_sub),
    (Mul, mul, T, dot),
);
/// [`impl_vector_scalar_operations`] macro implements vector-scalar operations.
///
macro_rules! impl_vector_scalar_operations {
    ($(($trait:ident, $method:ident, $op:tt),)+) => {$(
        impl<T: Scalar> $trait<T> for &Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: T) -> Self::Output {
                self.map(|a| a $op rhs)
            }
        }
        impl<T: Scalar> $trait<T> for Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: T) -> Self::Output {
                self.map(|a| a $op rhs)
            }
        }
    )+};
}
impl_vector_scalar_operations!((Mul, mul, *), (Div, div, /),);
impl<T: Scalar> Neg for &Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Self::Output {
        self.map(|a| -a)
    }
}
impl<T: Scalar> Neg for Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Self::Output {
        self.map(|a| -a)
    }
}

#[cfg(test)]
mod tests {
    use super::Vector;
    use crate::{errors::MathError, floats::FloatOperations};
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher},
    };

    fn vector(components: &[f64]) -> Vector<f64> {
        Vector::new(components).expect("Vector is not empty.")
    }

    fn hash_of(v: &Vector<f64>) -> u64 {
        let mut hasher: DefaultHasher = DefaultHasher::new();
        v.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn construction() {
        assert!(matches!(
            Vector::<f64>::new(Vec::new()),
            Err(MathError::InvalidArgument(_))
        ));

        let v: Vector<f64> = Vector::try_from([1.0, 2.0, 3.0]).expect("Vector is not empty.");
        let copy: Vector<f64> = v.clone();
        assert_eq!(v, copy);
        assert_eq!(copy.dimension(), 3);
        assert_eq!(copy[2], 3.0);
        assert_eq!(copy.get(0), Ok(1.0));
        assert!(matches!(copy.get(3), Err(MathError::InvalidArgument(_))));
        assert_eq!(copy.into_components(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn arithmetic() {
        let v: Vector<f64> = vector(&[1.5, -2.0, 4.0]);
        let w: Vector<f64> = vector(&[0.25, 3.0, -1.0]);

        let sum: Vector<f64> = (&v + &w).expect("Dimensions are equal.");
        assert_eq!(sum, vector(&[1.75, 1.0, 3.0]));
        assert_eq!((&sum - &w).expect("Dimensions are equal."), v);
        assert_eq!(-&v, vector(&[-1.5, 2.0, -4.0]));
        assert_eq!(&v * 2.0, vector(&[3.0, -4.0, 8.0]));
        assert_eq!(&v / 2.0, vector(&[0.75, -1.0, 2.0]));
        assert_eq!((&v * &w).expect("Dimensions are equal."), 0.375 - 6.0 - 4.0);
        assert_eq!((v.clone() + w.clone()).expect("Dimensions are equal."), sum);

        let short: Vector<f64> = vector(&[1.0, 2.0]);
        assert_eq!(
            &v + &short,
            Err(MathError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            &v - &short,
            Err(MathError::DimensionMismatch { .. })
        ));
        assert!(matches!(&v * &short, Err(MathError::DimensionMismatch { .. })));
    }

    #[test]
    fn norm() {
        let v: Vector<f64> = vector(&[3.0, 4.0]);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(v.sqr_norm(), 25.0);
        assert_eq!(vector(&[0.0, 0.0]).norm(), 0.0);

        let normalized: Vector<f64> = vector(&[1.0, -2.0, 2.0, 4.0]).normalize();
        assert!((normalized.norm() - 1.0).abs() < 1e-12);
        assert!(vector(&[0.0, 0.0]).normalize().iter().all(|elem| !elem.is_finite()));

        let angle: f64 = vector(&[1.0, 0.0])
            .angle(&vector(&[0.0, 2.0]))
            .expect("Dimensions are equal.");
        assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn normal_space() {
        let v: Vector<f64> = vector(&[1.0, 2.0, 3.0]);
        let normal: Vector<f64> = v.to_normal_space();
        assert_eq!(normal, vector(&[1.0, 2.0, 3.0, 1.0]));
        assert_eq!(normal.from_normal_space(), Ok(v));
        assert_eq!(
            vector(&[2.0, 4.0, 0.5]).from_normal_space(),
            Ok(vector(&[4.0, 8.0]))
        );
        assert!(matches!(
            vector(&[1.0]).from_normal_space(),
            Err(MathError::InvalidArgument(_))
        ));
    }

    #[test]
    fn generalized_cross_product() {
        let a: Vector<f64> = vector(&[1.0, 2.0, 3.0]);
        let b: Vector<f64> = vector(&[4.0, 5.0, 6.0]);
        let cross: Vector<f64> = Vector::product(&[a.clone(), b.clone()]).expect("Dimensions are correct.");
        assert_eq!(cross, vector(&[-3.0, 6.0, -3.0]));
        assert_eq!(cross.dot(&a), Ok(0.0));
        assert_eq!(cross.dot(&b), Ok(0.0));

        assert_eq!(
            Vector::product(&[vector(&[1.0, 0.0])]),
            Ok(vector(&[0.0, 1.0]))
        );

        let vectors: Vec<Vector<f64>> = vec![
            vector(&[1.0, 2.0, 0.0, -1.0]),
            vector(&[0.0, 3.0, 1.0, 2.0]),
            vector(&[2.0, -1.0, 4.0, 1.0]),
        ];
        let orthogonal: Vector<f64> = Vector::product(&vectors).expect("Dimensions are correct.");
        assert!(orthogonal.norm() > 0.0);
        for v in &vectors {
            assert_eq!(orthogonal.dot(v), Ok(0.0));
        }

        let basis: Vec<Vector<f64>> = vec![
            vector(&[1.0, 0.0, 0.0, 0.0]),
            vector(&[0.0, 1.0, 0.0, 0.0]),
            vector(&[0.0, 0.0, 1.0, 0.0]),
        ];
        assert_eq!(
            Vector::product(&basis),
            Ok(vector(&[0.0, 0.0, 0.0, 1.0]))
        );

        assert!(matches!(
            Vector::<f64>::product(&[]),
            Err(MathError::InvalidArgument(_))
        ));
        assert_eq!(
            Vector::product(&[a, vector(&[1.0, 2.0])]),
            Err(MathError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn barycenter() {
        let points: Vec<Vector<f64>> = vec![
            vector(&[0.0, 0.0]),
            vector(&[4.0, 0.0]),
            vector(&[4.0, 4.0]),
            vector(&[0.0, 4.0]),
        ];
        assert_eq!(Vector::barycenter(&points), Ok((4.0, vector(&[2.0, 2.0]))));

        let weighted: Vec<(Vector<f64>, f64)> =
            vec![(vector(&[0.0, 0.0]), 3.0), (vector(&[4.0, 8.0]), 1.0)];
        assert_eq!(
            Vector::weighted_barycenter(&weighted),
            Ok((4.0, vector(&[1.0, 2.0])))
        );

        assert!(matches!(
            Vector::<f64>::barycenter(&[]),
            Err(MathError::InvalidArgument(_))
        ));
        assert!(matches!(
            Vector::barycenter(&[vector(&[1.0]), vector(&[1.0, 2.0])]),
            Err(MathError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn equality_and_hash() {
        let v: Vector<f64> = vector(&[0.1 + 0.2, 1.0]);
        let w: Vector<f64> = vector(&[0.3, 1.0]);
        assert_ne!(v, w);
        assert!(v.almost_equal(&w, 1e-9));
        assert!(!v.almost_equal(&vector(&[0.3]), 1e-9));

        assert_eq!(hash_of(&vector(&[0.0, 1.0])), hash_of(&vector(&[-0.0, 1.0])));
        assert_ne!(hash_of(&vector(&[1.0, 2.0])), hash_of(&vector(&[2.0, 1.0])));
    }

    #[test]
    fn formatting() {
        let v: Vector<f64> = vector(&[1.0, 2.5]);
        assert_eq!(v.to_string(), "(1, 2.5)");
        assert_eq!(format!("{v:.2}"), "(1.00, 2.50)");
        assert_eq!(
            vector(&[1.5, 0.00001, 0.99999]).correct_to(0),
            vector(&[1.5, 0.0, 1.0])
        );
        assert_eq!(vector(&[1.23456]).round_up_to(2), vector(&[1.23]));
    }

    #[test]
    fn serialization() {
        let v: Vector<f64> = vector(&[1.0, -2.0]);
        let bytes: Vec<u8> = serde_cbor::to_vec(&v).expect("Vector is serializable.");
        let restored: Vector<f64> = serde_cbor::from_slice(&bytes).expect("Bytes are valid.");
        assert_eq!(restored, v);

        let empty: Vec<u8> = serde_cbor::to_vec(&Vec::<f64>::new()).expect("Vec is serializable.");
        assert!(serde_cbor::from_slice::<Vector<f64>>(&empty).is_err());
    }
}
