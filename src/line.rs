//! Lines.

use std::ops::{Mul, Range};

use arrayvec::ArrayVec;

use crate::common::{solve_linear, Roots};
use crate::param_curve::{merge_axis_params, MAX_EXTREMA};
use crate::{Affine, ParamCurve, ParamCurveExtrema, ParamCurveIntersect, Point};

/// A single line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct Line {
    pub p0: Point,
    pub p1: Point,
}

impl Line {
    /// Create a new line segment.
    #[inline]
    pub fn new<V: Into<Point>>(p0: V, p1: V) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p1
    }

    fn subsegment(&self, range: Range<f64>) -> Line {
        Line {
            p0: self.eval(range.start),
            p1: self.eval(range.end),
        }
    }
}

impl ParamCurveExtrema for Line {
    #[inline]
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        ArrayVec::new()
    }
}

impl ParamCurveIntersect for Line {
    #[inline]
    fn degree(&self) -> usize {
        1
    }

    #[inline]
    fn deviation_from_line(&self) -> f64 {
        0.0
    }

    fn params_for_point(&self, p: Point, epsilon: f64) -> Roots {
        let d = self.p1 - self.p0;
        merge_axis_params(
            solve_linear(self.p0.x - p.x, d.x),
            solve_linear(self.p0.y - p.y, d.y),
            epsilon,
        )
    }
}

impl Mul<Line> for Affine {
    type Output = Line;

    #[inline]
    fn mul(self, other: Line) -> Line {
        Line {
            p0: self * other.p0,
            p1: self * other.p1,
        }
    }
}
