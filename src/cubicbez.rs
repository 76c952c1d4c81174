//! Cubic Bézier segments.

use std::ops::{Mul, Range};

use arrayvec::ArrayVec;

use crate::common::{solve_cubic, solve_quadratic, Roots};
use crate::param_curve::{merge_axis_params, MAX_EXTREMA};
use crate::{
    Affine, ParamCurve, ParamCurveDeriv, ParamCurveExtrema, ParamCurveIntersect, Point, QuadBez,
};

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct CubicBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<V: Into<Point>>(p0: V, p1: V, p2: V, p3: V) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p3
    }

    fn subsegment(&self, range: Range<f64>) -> CubicBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p3 = self.eval(t1);
        let d = self.deriv();
        let scale = (t1 - t0) * (1.0 / 3.0);
        let p1 = p0 + scale * d.eval(t0).to_vec2();
        let p2 = p3 - scale * d.eval(t1).to_vec2();
        CubicBez { p0, p1, p2, p3 }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (CubicBez, CubicBez) {
        let pm = self.eval(0.5);
        (
            CubicBez::new(
                self.p0,
                self.p0.midpoint(self.p1),
                ((self.p0.to_vec2() + self.p1.to_vec2() * 2.0 + self.p2.to_vec2()) * 0.25)
                    .to_point(),
                pm,
            ),
            CubicBez::new(
                pm,
                ((self.p1.to_vec2() + self.p2.to_vec2() * 2.0 + self.p3.to_vec2()) * 0.25)
                    .to_point(),
                self.p2.midpoint(self.p3),
                self.p3,
            ),
        )
    }
}

impl ParamCurveDeriv for CubicBez {
    type DerivResult = QuadBez;

    #[inline]
    fn deriv(&self) -> QuadBez {
        QuadBez::new(
            (3.0 * (self.p1 - self.p0)).to_point(),
            (3.0 * (self.p2 - self.p1)).to_point(),
            (3.0 * (self.p3 - self.p2)).to_point(),
        )
    }
}

impl ParamCurveExtrema for CubicBez {
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        fn one_coord(result: &mut ArrayVec<f64, MAX_EXTREMA>, d0: f64, d1: f64, d2: f64) {
            let a = d0 - 2.0 * d1 + d2;
            let b = 2.0 * (d1 - d0);
            let c = d0;
            if let Roots::Finite(roots) = solve_quadratic(c, b, a) {
                for &t in &roots {
                    if t > 0.0 && t < 1.0 && !result.contains(&t) {
                        result.push(t);
                    }
                }
            }
        }
        let mut result = ArrayVec::new();
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let d2 = self.p3 - self.p2;
        one_coord(&mut result, d0.x, d1.x, d2.x);
        one_coord(&mut result, d0.y, d1.y, d2.y);
        result.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
        result
    }
}

impl ParamCurveIntersect for CubicBez {
    #[inline]
    fn degree(&self) -> usize {
        3
    }

    fn deviation_from_line(&self) -> f64 {
        let chord = self.p3 - self.p0;
        let len2 = chord.hypot2();
        if len2 == 0.0 {
            return f64::INFINITY;
        }
        let v1 = self.p1 - self.p0;
        let v2 = self.p2 - self.p0;
        let proj1 = chord.dot(v1);
        let proj2 = chord.dot(v2);
        if proj1 < 0.0 || proj1 > len2 || proj2 < 0.0 || proj2 > len2 {
            return f64::INFINITY;
        }
        // The signed perpendicular coordinate relative to the chord is
        // g(t) = 3t(1-t)((1-t)a + tb); its extrema are the roots of a
        // quadratic in t. When a = b the quadratic degenerates and the
        // single extremum sits at t = 0.5.
        let a = chord.cross(v1);
        let b = chord.cross(v2);
        match solve_quadratic(a, 2.0 * (b - 2.0 * a), 3.0 * (a - b)) {
            // g is identically zero: the curve lies on the chord.
            Roots::Indeterminate => 0.0,
            Roots::Finite(roots) => {
                let mut max = 0.0f64;
                for &t in &roots {
                    if t > 0.0 && t < 1.0 {
                        let g = 3.0 * t * (1.0 - t) * ((1.0 - t) * a + t * b);
                        max = max.max(g.abs());
                    }
                }
                max / len2
            }
        }
    }

    fn params_for_point(&self, p: Point, epsilon: f64) -> Roots {
        let axis = |s: f64, c1: f64, c2: f64, e: f64, v: f64| {
            solve_cubic(
                s - v,
                3.0 * (c1 - s),
                3.0 * (s - 2.0 * c1 + c2),
                -s + 3.0 * c1 - 3.0 * c2 + e,
            )
        };
        merge_axis_params(
            axis(self.p0.x, self.p1.x, self.p2.x, self.p3.x, p.x),
            axis(self.p0.y, self.p1.y, self.p2.y, self.p3.y, p.y),
            epsilon,
        )
    }
}

impl Mul<CubicBez> for Affine {
    type Output = CubicBez;

    #[inline]
    fn mul(self, c: CubicBez) -> CubicBez {
        CubicBez {
            p0: self * c.p0,
            p1: self * c.p1,
            p2: self * c.p2,
            p3: self * c.p3,
        }
    }
}
