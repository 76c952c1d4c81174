//! Quadratic Bézier segments.

use std::ops::{Mul, Range};

use arrayvec::ArrayVec;

use crate::common::{solve_quadratic, Roots};
use crate::param_curve::{merge_axis_params, MAX_EXTREMA};
use crate::{
    Affine, Line, ParamCurve, ParamCurveDeriv, ParamCurveExtrema, ParamCurveIntersect, Point,
};

/// A single quadratic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct QuadBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl QuadBez {
    /// Create a new quadratic Bézier segment.
    #[inline]
    pub fn new<V: Into<Point>>(p0: V, p1: V, p2: V) -> QuadBez {
        QuadBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
        }
    }
}

impl ParamCurve for QuadBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        (self.p0.to_vec2() * (mt * mt)
            + (self.p1.to_vec2() * (mt * 2.0) + self.p2.to_vec2() * t) * t)
            .to_point()
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p2
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (QuadBez, QuadBez) {
        let pm = self.eval(0.5);
        (
            QuadBez::new(self.p0, self.p0.midpoint(self.p1), pm),
            QuadBez::new(pm, self.p1.midpoint(self.p2), self.p2),
        )
    }

    fn subsegment(&self, range: Range<f64>) -> QuadBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p2 = self.eval(t1);
        let p1 = p0 + (self.p1 - self.p0).lerp(self.p2 - self.p1, t0) * (t1 - t0);
        QuadBez { p0, p1, p2 }
    }
}

impl ParamCurveDeriv for QuadBez {
    type DerivResult = Line;

    #[inline]
    fn deriv(&self) -> Line {
        Line::new(
            (2.0 * (self.p1 - self.p0)).to_point(),
            (2.0 * (self.p2 - self.p1)).to_point(),
        )
    }
}

impl ParamCurveExtrema for QuadBez {
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        let mut result = ArrayVec::new();
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let dd = d1 - d0;
        if dd.x != 0.0 {
            let t = -d0.x / dd.x;
            if t > 0.0 && t < 1.0 {
                result.push(t);
            }
        }
        if dd.y != 0.0 {
            let t = -d0.y / dd.y;
            if t > 0.0 && t < 1.0 && !result.contains(&t) {
                result.push(t);
                if result.len() == 2 && result[0] > t {
                    result.swap(0, 1);
                }
            }
        }
        result
    }
}

impl ParamCurveIntersect for QuadBez {
    #[inline]
    fn degree(&self) -> usize {
        2
    }

    fn deviation_from_line(&self) -> f64 {
        let chord = self.p2 - self.p0;
        let len2 = chord.hypot2();
        if len2 == 0.0 {
            return f64::INFINITY;
        }
        let v = self.p1 - self.p0;
        let proj = chord.dot(v);
        if proj < 0.0 || proj > len2 {
            return f64::INFINITY;
        }
        chord.cross(v).abs() / len2
    }

    fn params_for_point(&self, p: Point, epsilon: f64) -> Roots {
        let axis = |s: f64, c: f64, e: f64, v: f64| {
            solve_quadratic(s - v, 2.0 * (c - s), s - 2.0 * c + e)
        };
        merge_axis_params(
            axis(self.p0.x, self.p1.x, self.p2.x, p.x),
            axis(self.p0.y, self.p1.y, self.p2.y, p.y),
            epsilon,
        )
    }
}

impl Mul<QuadBez> for Affine {
    type Output = QuadBez;

    #[inline]
    fn mul(self, other: QuadBez) -> QuadBez {
        QuadBez {
            p0: self * other.p0,
            p1: self * other.p1,
            p2: self * other.p2,
        }
    }
}
