//! Affine transforms.

use std::ops::{Mul, MulAssign};

use crate::{Point, Vec2};

/// A 2D affine transform.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine([f64; 6]);

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Affine = Affine([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Construct an affine transform from coefficients.
    ///
    /// The coefficients are in the order `[a, b, c, d, e, f]`, mapping a
    /// point `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
    #[inline]
    pub const fn new(c: [f64; 6]) -> Affine {
        Affine(c)
    }

    /// An affine transform representing uniform scaling.
    #[inline]
    pub const fn scale(s: f64) -> Affine {
        Affine([s, 0.0, 0.0, s, 0.0, 0.0])
    }

    /// An affine transform representing non-uniform scaling.
    #[inline]
    pub const fn scale_non_uniform(sx: f64, sy: f64) -> Affine {
        Affine([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// An affine transform representing rotation.
    #[inline]
    pub fn rotate(th: f64) -> Affine {
        let (s, c) = th.sin_cos();
        Affine([c, s, -s, c, 0.0, 0.0])
    }

    /// An affine transform representing translation.
    #[inline]
    pub fn translate<V: Into<Vec2>>(v: V) -> Affine {
        let v = v.into();
        Affine([1.0, 0.0, 0.0, 1.0, v.x, v.y])
    }

    /// A rotation by `th` radians about `center`.
    #[inline]
    pub fn rotate_about(th: f64, center: Point) -> Affine {
        let v = center.to_vec2();
        Affine::translate(v) * Affine::rotate(th) * Affine::translate(-v)
    }

    /// A component-wise scaling about `center`.
    #[inline]
    pub fn scale_about(sx: f64, sy: f64, center: Point) -> Affine {
        let v = center.to_vec2();
        Affine::translate(v) * Affine::scale_non_uniform(sx, sy) * Affine::translate(-v)
    }

    /// Get the coefficients of the transform.
    #[inline]
    pub const fn as_coeffs(self) -> [f64; 6] {
        self.0
    }
}

impl Default for Affine {
    #[inline]
    fn default() -> Affine {
        Affine::IDENTITY
    }
}

impl Mul<Point> for Affine {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Point {
        Point::new(
            self.0[0] * other.x + self.0[2] * other.y + self.0[4],
            self.0[1] * other.x + self.0[3] * other.y + self.0[5],
        )
    }
}

impl Mul for Affine {
    type Output = Affine;

    #[inline]
    fn mul(self, other: Affine) -> Affine {
        Affine([
            self.0[0] * other.0[0] + self.0[2] * other.0[1],
            self.0[1] * other.0[0] + self.0[3] * other.0[1],
            self.0[0] * other.0[2] + self.0[2] * other.0[3],
            self.0[1] * other.0[2] + self.0[3] * other.0[3],
            self.0[0] * other.0[4] + self.0[2] * other.0[5] + self.0[4],
            self.0[1] * other.0[4] + self.0[3] * other.0[5] + self.0[5],
        ])
    }
}

impl MulAssign for Affine {
    #[inline]
    fn mul_assign(&mut self, other: Affine) {
        *self = self.mul(other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{:?} != {:?}", p0, p1);
    }

    #[test]
    fn affine_basic() {
        let p = Point::new(3.0, 4.0);

        assert_near(Affine::default() * p, p);
        assert_near(Affine::scale(2.0) * p, Point::new(6.0, 8.0));
        assert_near(Affine::rotate(0.0) * p, p);
        assert_near(Affine::rotate(PI / 2.0) * p, Point::new(-4.0, 3.0));
        assert_near(Affine::translate((5.0, 6.0)) * p, Point::new(8.0, 10.0));
    }

    #[test]
    fn affine_mul() {
        let a1 = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let a2 = Affine::new([0.1, 1.2, 2.3, 3.4, 4.5, 5.6]);

        let px = Point::new(1.0, 0.0);
        let py = Point::new(0.0, 1.0);
        let pxy = Point::new(1.0, 1.0);
        assert_near(a1 * (a2 * px), (a1 * a2) * px);
        assert_near(a1 * (a2 * py), (a1 * a2) * py);
        assert_near(a1 * (a2 * pxy), (a1 * a2) * pxy);
    }

    #[test]
    fn about_center() {
        let c = Point::new(1.0, 1.0);
        // Rotating the center is a fixed point.
        assert_near(Affine::rotate_about(0.7, c) * c, c);
        assert_near(
            Affine::rotate_about(PI, c) * Point::new(2.0, 1.0),
            Point::new(0.0, 1.0),
        );
        assert_near(
            Affine::scale_about(2.0, 3.0, c) * Point::new(2.0, 2.0),
            Point::new(3.0, 4.0),
        );
    }
}
