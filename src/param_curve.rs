//! Traits for curves parametrized by a scalar.

use std::ops::Range;

use arrayvec::ArrayVec;

use crate::common::Roots;
use crate::real::{approx_eq, snap_to_integer};
use crate::{Point, Rect};

/// The maximum number of interior extrema of a curve segment.
pub const MAX_EXTREMA: usize = 4;

/// The maximum number of extreme points: interior extrema plus the two
/// endpoints.
pub const MAX_EXTREME_POINTS: usize = MAX_EXTREMA + 2;

/// A curve parametrized by a scalar.
///
/// The parameter `t` is generally in the range [0..1], with `t = 0`
/// yielding the start point and `t = 1` the end point.
pub trait ParamCurve: Sized {
    /// Evaluate the curve at parameter `t`.
    fn eval(&self, t: f64) -> Point;

    /// The start point.
    fn start(&self) -> Point {
        self.eval(0.0)
    }

    /// The end point.
    fn end(&self) -> Point {
        self.eval(1.0)
    }

    /// The curve restricted to the given parameter range, reparametrized
    /// to [0..1].
    fn subsegment(&self, range: Range<f64>) -> Self;

    /// Subdivide into halves, using de Casteljau.
    ///
    /// The two returned curves share a midpoint value but no mutable
    /// state.
    fn subdivide(&self) -> (Self, Self) {
        (self.subsegment(0.0..0.5), self.subsegment(0.5..1.0))
    }

    /// Split into the parts before and after `t`.
    fn split(&self, t: f64) -> (Self, Self) {
        (self.subsegment(0.0..t), self.subsegment(t..1.0))
    }
}

/// A differentiable parametrized curve.
pub trait ParamCurveDeriv {
    /// The parametric curve obtained by taking the derivative of this one.
    type DerivResult: ParamCurve;

    /// The derivative of the curve.
    fn deriv(&self) -> Self::DerivResult;
}

/// An extreme point of a curve: a parameter at which one coordinate's
/// derivative vanishes, or an endpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtremePoint {
    /// The parameter value.
    pub t: f64,
    /// The curve evaluated at `t`.
    pub point: Point,
}

/// A parametrized curve that reports its extrema.
pub trait ParamCurveExtrema: ParamCurve {
    /// Compute the interior extrema of the curve.
    ///
    /// Only extrema within the open interval (0, 1) are reported. The
    /// result is sorted and deduplicated, and contains the parameters at
    /// which either coordinate's derivative vanishes, so that the curve is
    /// monotonic in both coordinates between consecutive entries.
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA>;

    /// The endpoints and interior extrema, each with its evaluated point.
    fn extreme_points(&self) -> ArrayVec<ExtremePoint, MAX_EXTREME_POINTS> {
        let mut result = ArrayVec::new();
        result.push(ExtremePoint {
            t: 0.0,
            point: self.start(),
        });
        for t in self.extrema() {
            result.push(ExtremePoint {
                t,
                point: self.eval(t),
            });
        }
        result.push(ExtremePoint {
            t: 1.0,
            point: self.end(),
        });
        result
    }

    /// The smallest rectangle that encloses the curve in the range (0..1).
    ///
    /// Computed from the extreme points, so interior extrema count.
    fn bounding_box(&self) -> Rect {
        let mut bbox = Rect::from_points(self.start(), self.end());
        for t in self.extrema() {
            bbox = bbox.union_pt(self.eval(t));
        }
        bbox
    }
}

/// The capability set the intersection engine consumes.
///
/// Implemented by [`Line`], [`QuadBez`] and [`CubicBez`].
///
/// [`Line`]: crate::Line
/// [`QuadBez`]: crate::QuadBez
/// [`CubicBez`]: crate::CubicBez
pub trait ParamCurveIntersect: ParamCurveExtrema + Copy {
    /// Polynomial degree of the parametrization: 1, 2 or 3.
    fn degree(&self) -> usize;

    /// Normalized maximum deviation of the curve from its chord.
    ///
    /// This is the maximum over `t` of |chord × (eval(t) − start)|
    /// divided by the squared chord length, i.e. the maximum perpendicular
    /// distance in units of the chord length. Returns +∞ when the
    /// projection of a control point onto the chord falls outside the
    /// chord's own span (the curve overshoots its endpoints along the
    /// chord axis), or when the chord is degenerate.
    fn deviation_from_line(&self) -> f64;

    /// Parameter values at which the curve passes through `p`.
    ///
    /// Solves `x(t) = p.x` and `y(t) = p.y` independently and intersects
    /// the two root sets, pairing roots within `epsilon` of each other and
    /// snapping near-integer parameters. If exactly one axis is
    /// indeterminate (that coordinate is constant and equal to `p`'s), the
    /// other axis's roots within [0, 1] are returned; if both are, the
    /// curve is point-degenerate at `p` and the result is
    /// [`Roots::Indeterminate`].
    fn params_for_point(&self, p: Point, epsilon: f64) -> Roots;
}

/// Combine per-axis root sets into curve parameters.
pub(crate) fn merge_axis_params(rx: Roots, ry: Roots, epsilon: f64) -> Roots {
    match (rx, ry) {
        (Roots::Indeterminate, Roots::Indeterminate) => Roots::Indeterminate,
        (Roots::Indeterminate, Roots::Finite(roots))
        | (Roots::Finite(roots), Roots::Indeterminate) => {
            let mut result = ArrayVec::new();
            for t in roots {
                let t = snap_to_integer(t, epsilon);
                if (0.0..=1.0).contains(&t) && !result.contains(&t) {
                    result.push(t);
                }
            }
            Roots::Finite(result)
        }
        (Roots::Finite(rx), Roots::Finite(ry)) => {
            let mut result = ArrayVec::new();
            for &tx in &rx {
                if ry.iter().any(|&ty| approx_eq(tx, ty, epsilon)) {
                    let t = snap_to_integer(tx, epsilon);
                    if !result.contains(&t) {
                        result.push(t);
                    }
                }
            }
            Roots::Finite(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{solve_linear, solve_quadratic};

    #[test]
    fn merge_matching_roots() {
        let rx = solve_quadratic(0.25, -1.25, 1.0); // roots 0.25, 1
        let ry = solve_quadratic(0.25, -1.25, 1.0);
        let merged = merge_axis_params(rx, ry, 1e-10);
        assert_eq!(
            merged,
            Roots::Finite([1.0, 0.25].into_iter().collect())
        );
    }

    #[test]
    fn merge_disjoint_roots() {
        let rx = solve_linear(-0.25, 1.0); // root 0.25
        let ry = solve_linear(-0.75, 1.0); // root 0.75
        assert_eq!(
            merge_axis_params(rx, ry, 1e-10),
            Roots::Finite(ArrayVec::new())
        );
    }

    #[test]
    fn merge_one_indeterminate() {
        // One root in range, one far outside; only the in-range root of
        // the finite axis survives.
        let ry = solve_quadratic(-3.0, 2.5, 1.0);
        let merged = merge_axis_params(Roots::Indeterminate, ry, 1e-10);
        if let Roots::Finite(ts) = merged {
            assert_eq!(ts.len(), 1);
            assert!((0.0..=1.0).contains(&ts[0]));
        } else {
            panic!("expected finite roots");
        }
        assert_eq!(
            merge_axis_params(Roots::Indeterminate, Roots::Indeterminate, 1e-10),
            Roots::Indeterminate
        );
    }
}
