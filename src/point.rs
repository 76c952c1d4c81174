//! A 2d point.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use thiserror::Error;

use crate::Vec2;

/// A 2d point.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

/// The error returned when constructing a [`Point`] from malformed raw
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidPoint {
    /// The input did not have exactly two coordinates.
    #[error("expected exactly two coordinates, got {0}")]
    WrongLength(usize),
    /// A coordinate was NaN or infinite.
    #[error("coordinate {0} is not a finite number")]
    NotFinite(usize),
}

impl Point {
    /// The point (0, 0).
    pub const ZERO: Point = Point::new(0., 0.);

    /// Create a new `Point` with the provided `x` and `y` coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Create a `Point` from a slice of raw coordinates.
    ///
    /// The slice must hold exactly two finite values; anything else is an
    /// [`InvalidPoint`] error. This is the checked boundary for data coming
    /// from deserialized or otherwise untrusted sources.
    pub fn from_slice(coords: &[f64]) -> Result<Point, InvalidPoint> {
        match *coords {
            [x, y] => {
                if !x.is_finite() {
                    Err(InvalidPoint::NotFinite(0))
                } else if !y.is_finite() {
                    Err(InvalidPoint::NotFinite(1))
                } else {
                    Ok(Point::new(x, y))
                }
            }
            _ => Err(InvalidPoint::WrongLength(coords.len())),
        }
    }

    /// Convert this point into a `Vec2`.
    #[inline]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Linearly interpolate between two points.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self.to_vec2().lerp(other.to_vec2(), t).to_point()
    }

    /// Determine the midpoint of two points.
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).hypot()
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from(v: (f64, f64)) -> Point {
        Point { x: v.0, y: v.1 }
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(v: Point) -> (f64, f64) {
        (v.x, v.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Vec2) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign<Vec2> for Point {
    #[inline]
    fn add_assign(&mut self, other: Vec2) {
        *self = Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Vec2) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign<Vec2> for Point {
    #[inline]
    fn sub_assign(&mut self, other: Vec2) {
        *self = Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Sub<Point> for Point {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Point) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}

// Points serialize as two-element ordered arrays, not as maps.
#[cfg(feature = "serde")]
impl serde::Serialize for Point {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&(self.x, self.y), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Point {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Point, D::Error> {
        let (x, y) = <(f64, f64) as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Point::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        assert_eq!(
            Point::new(0., 0.) - Vec2::new(10., 0.),
            Point::new(-10., 0.)
        );
        assert_eq!(
            Point::new(0., 0.) - Point::new(-5., 101.),
            Vec2::new(5., -101.)
        );
    }

    #[test]
    fn distance() {
        let p1 = Point::new(0., 10.);
        let p2 = Point::new(0., 5.);
        assert_eq!(p1.distance(p2), 5.);

        let p1 = Point::new(-11., 1.);
        let p2 = Point::new(-7., -2.);
        assert_eq!(p1.distance(p2), 5.);
    }

    #[test]
    fn from_slice() {
        assert_eq!(Point::from_slice(&[1.0, 2.0]), Ok(Point::new(1.0, 2.0)));
        assert_eq!(
            Point::from_slice(&[1.0]),
            Err(InvalidPoint::WrongLength(1))
        );
        assert_eq!(
            Point::from_slice(&[1.0, 2.0, 3.0]),
            Err(InvalidPoint::WrongLength(3))
        );
        assert_eq!(
            Point::from_slice(&[f64::NAN, 0.0]),
            Err(InvalidPoint::NotFinite(0))
        );
        assert_eq!(
            Point::from_slice(&[0.0, f64::INFINITY]),
            Err(InvalidPoint::NotFinite(1))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let p = Point::new(1.5, -2.0);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[1.5,-2.0]");
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
