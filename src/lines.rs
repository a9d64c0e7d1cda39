//! `lines` submodule implements n-dimensional lines that are defined by point and direction.
//!

use crate::{
    errors::{ensure_dimension, MathResult},
    floats::Scalar,
    vectors::Vector,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// [`Line`] struct represents infinite line that passes through a point along a direction.
///
/// Direction is not normalized. Zero direction is allowed, but projections onto such line
/// have non-finite results.
///
/// # Example
/// ```rust
/// # use linmath::{lines::Line, vectors::Vector};
/// let line: Line<f64> = Line::new(
///     Vector::new([0.0, 0.0]).expect("Vector is not empty."),
///     Vector::new([1.0, 0.0]).expect("Vector is not empty."),
/// ).expect("Dimensions are equal.");
/// let point: Vector<f64> = Vector::new([3.0, 4.0]).expect("Vector is not empty.");
/// assert_eq!(line.distance_to(&point), Ok(4.0));
/// ```
///
#[derive(Clone, Debug)]
pub struct Line<T> {
    /// Point on the line.
    ///
    point: Vector<T>,
    /// Direction of the line.
    ///
    direction: Vector<T>,
}
impl<T: Scalar> Line<T> {
    /// Constructs line from point and direction.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`](crate::errors::MathError::DimensionMismatch)
    /// if point and direction have different dimensions.
    ///
    pub fn new(point: Vector<T>, direction: Vector<T>) -> MathResult<Self> {
        ensure_dimension(point.dimension(), direction.dimension())?;
        Ok(Line { point, direction })
    }
    /// Constructs line that passes through two points.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`](crate::errors::MathError::DimensionMismatch)
    /// if points have different dimensions.
    ///
    pub fn through(from: Vector<T>, to: &Vector<T>) -> MathResult<Self> {
        let direction: Vector<T> = to.checked_sub(&from)?;
        Ok(Line {
            point: from,
            direction,
        })
    }

    /// Returns point that defines the line.
    ///
    pub fn point(&self) -> &Vector<T> {
        &self.point
    }
    /// Returns direction of the line.
    ///
    pub fn direction(&self) -> &Vector<T> {
        &self.direction
    }
    /// Returns dimension of the space.
    ///
    pub fn dimension(&self) -> usize {
        self.point.dimension()
    }
    /// Returns line with reversed direction.
    ///
    pub fn reversed(&self) -> Self {
        Line {
            point: self.point.clone(),
            direction: -&self.direction,
        }
    }

    /// Returns point `point + t · direction`.
    ///
    pub fn point_at(&self, t: T) -> Vector<T> {
        Vector::from_components(
            self.point
                .iter()
                .zip(self.direction.iter())
                .map(|(&p, &d)| p + t * d)
                .collect(),
        )
    }
    /// Returns parameter of the orthogonal projection of the point onto the line.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`](crate::errors::MathError::DimensionMismatch)
    /// if point is of another dimension.
    ///
    pub fn projection(&self, point: &Vector<T>) -> MathResult<T> {
        let offset: Vector<T> = point.checked_sub(&self.point)?;
        Ok(offset.dot(&self.direction)? / self.direction.sqr_norm())
    }
    /// Returns the point of the line that is closest to the given point.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`](crate::errors::MathError::DimensionMismatch)
    /// if point is of another dimension.
    ///
    pub fn closest_point(&self, point: &Vector<T>) -> MathResult<Vector<T>> {
        let t: T = self.projection(point)?;
        Ok(self.point_at(t))
    }
    /// Returns Euclidean distance from the point to the line.
    ///
    /// # Errors
    /// Returns [`MathError::DimensionMismatch`](crate::errors::MathError::DimensionMismatch)
    /// if point is of another dimension.
    ///
    pub fn distance_to(&self, point: &Vector<T>) -> MathResult<T> {
        let closest: Vector<T> = self.closest_point(point)?;
        Ok(point.checked_sub(&closest)?.norm())
    }
}
impl<T: Scalar> PartialEq for Line<T> {
    /// Checks if lines have exactly equal points and directions.
    ///
    /// Lines that coincide geometrically but are defined differently are not equal.
    ///
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point && self.direction == other.direction
    }
}
impl<T: Scalar + Serialize> Serialize for Line<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.point, &self.direction).serialize(serializer)
    }
}
impl<'de, T: Scalar + Deserialize<'de>> Deserialize<'de> for Line<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (point, direction): (Vector<T>, Vector<T>) = Deserialize::deserialize(deserializer)?;
        Line::new(point, direction).map_err(de::Error::custom)
    }
}
