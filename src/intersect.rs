//! Robust intersection of parametric edges.
//!
//! The entry points are [`line_intersections`] for the exact segment
//! crossing, [`intersections`] for any pair of edges, and
//! [`self_intersections`] for a single edge against itself. All of them
//! distinguish finitely many crossings from overlapping configurations
//! with infinitely many common points, which are reported as
//! [`Intersections::Indeterminate`].
//!
//! The general case runs a breadth-first adaptive subdivision: a FIFO
//! queue of tasks over the parameter square, where each task compares a
//! point or a subdivided piece of one edge against a point or a piece of
//! the other. Point-on-curve parameters are recovered exactly through the
//! closed-form solvers where possible; branches that outlive the depth
//! budget report their interval center with a matching error radius.

use std::collections::VecDeque;

use crate::common::Roots;
use crate::param_curve::ExtremePoint;
use crate::real::approx_eq;
use crate::{Line, ParamCurve, ParamCurveExtrema, ParamCurveIntersect, Point};

/// Default tolerance for parameter-space comparisons.
pub const DEFAULT_EPSILON: f64 = 16.0 * f64::EPSILON;

// Schedule for the chord-deviation early exit: the allowance grows as
// subdivision narrows the pieces, and is disabled entirely at the root,
// where a near-linear curve may still hide a crossing in its tails.
const MAX_DEVIATION_BASE: f64 = 5e-5;
const MAX_DEVIATION_CAP: f64 = 0.1;

fn max_deviation(depth: usize) -> f64 {
    if depth == 0 {
        0.0
    } else {
        (MAX_DEVIATION_BASE * (depth as f64).exp2()).min(MAX_DEVIATION_CAP)
    }
}

/// A single intersection of two edges.
#[derive(Clone, Copy, Debug)]
pub struct Intersection {
    /// The parameter on the first edge.
    pub t1: f64,
    /// The parameter on the second edge.
    pub t2: f64,
    /// The intersection point, averaged between the two edges'
    /// evaluations at (`t1`, `t2`).
    pub point: Point,
    /// Parametric error radius: zero for exactly recovered results,
    /// otherwise the half-width of the subdivision interval the result
    /// was read from.
    pub err: f64,
}

/// The result of an intersection query.
#[derive(Clone, Debug)]
pub enum Intersections {
    /// The edges coincide over a whole parameter interval, so there are
    /// infinitely many common points.
    Indeterminate,
    /// Finitely many intersections, possibly none.
    Finite(Vec<Intersection>),
}

impl Intersections {
    /// Whether the edges overlap over a whole interval.
    #[inline]
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Intersections::Indeterminate)
    }

    /// The finite list of intersections, or `None` if indeterminate.
    #[inline]
    pub fn finite(self) -> Option<Vec<Intersection>> {
        match self {
            Intersections::Indeterminate => None,
            Intersections::Finite(list) => Some(list),
        }
    }
}

/// The crossing of two segments' carrier lines, clipped to the segments.
enum LineCrossing {
    /// The segments lie on one line.
    Collinear,
    None,
    At(f64, f64),
}

/// Closed-form segment crossing, without the bounding-box prefilter.
fn line_params(line1: &Line, line2: &Line) -> LineCrossing {
    let d1 = line1.p1 - line1.p0;
    let d2 = line2.p1 - line2.p0;
    let pq = line1.p0 - line2.p0;
    let a = d1.cross(d2);
    let b1 = d2.cross(pq);
    let b2 = d1.cross(pq);
    if a == 0.0 {
        return if b1 == 0.0 || b2 == 0.0 {
            LineCrossing::Collinear
        } else {
            LineCrossing::None
        };
    }
    let t1 = b1 / a;
    let t2 = b2 / a;
    if (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&t2) {
        LineCrossing::At(t1, t2)
    } else {
        LineCrossing::None
    }
}

/// Compute the intersection of two line segments.
///
/// Overlapping collinear segments are [`Intersections::Indeterminate`].
/// The reported point is the mean of the two segments' evaluations, which
/// halves the coordinate round-off when the parameters are perturbed.
///
/// # Examples
///
/// ```
/// use krucigo::{line_intersections, Line};
///
/// let crossing = line_intersections(
///     &Line::new((0.0, 0.0), (3.0, 3.0)),
///     &Line::new((0.0, 2.0), (2.0, 2.0)),
/// );
/// let list = crossing.finite().unwrap();
/// assert_eq!(list.len(), 1);
/// assert!((list[0].t1 - 2.0 / 3.0).abs() < 1e-12);
/// assert!((list[0].t2 - 1.0).abs() < 1e-12);
/// ```
pub fn line_intersections(line1: &Line, line2: &Line) -> Intersections {
    let bb1 = line1.bounding_box();
    let bb2 = line2.bounding_box();
    if !bb1.overlaps(&bb2) {
        let mut result = Vec::new();
        if bb1.contacts(&bb2) {
            // The boxes touch without interior overlap; the only crossings
            // reported here are exactly shared endpoints.
            for (t1, p1) in [(0.0, line1.p0), (1.0, line1.p1)] {
                for (t2, p2) in [(0.0, line2.p0), (1.0, line2.p1)] {
                    if p1 == p2 {
                        result.push(Intersection {
                            t1,
                            t2,
                            point: Point::new(p1.x, p1.y),
                            err: 0.0,
                        });
                    }
                }
            }
        }
        return Intersections::Finite(result);
    }
    match line_params(line1, line2) {
        LineCrossing::Collinear => Intersections::Indeterminate,
        LineCrossing::None => Intersections::Finite(Vec::new()),
        LineCrossing::At(t1, t2) => {
            let point = line1.eval(t1).midpoint(line2.eval(t2));
            Intersections::Finite(vec![Intersection {
                t1,
                t2,
                point,
                err: 0.0,
            }])
        }
    }
}

/// A unit of subdivision work over the parameter square.
///
/// `t1` and `t2` are the centers of the current parameter intervals; at
/// depth `i` a curve payload covers an interval of half-width `2^(-i-1)`
/// around its center, while a point payload is pinned at its parameter.
struct Task<T, U> {
    depth: usize,
    t1: f64,
    t2: f64,
    kind: TaskKind<T, U>,
}

enum TaskKind<T, U> {
    PointPoint(Point, Point),
    PointCurve(Point, U),
    CurvePoint(T, Point),
    CurveCurve(T, U),
}

fn point_approx_eq(p1: Point, p2: Point, epsilon: f64) -> bool {
    approx_eq(p1.x, p2.x, epsilon) && approx_eq(p1.y, p2.y, epsilon)
}

/// Record an exact intersection unless one is already present at the same
/// parameters. Returns whether a new record was added.
fn push_exact(
    results: &mut Vec<Intersection>,
    t1: f64,
    t2: f64,
    point: Point,
    epsilon: f64,
) -> bool {
    let already = results
        .iter()
        .any(|r| r.err == 0.0 && approx_eq(r.t1, t1, epsilon) && approx_eq(r.t2, t2, epsilon));
    if already {
        return false;
    }
    results.push(Intersection {
        t1,
        t2,
        point,
        err: 0.0,
    });
    true
}

/// Merge results whose parameters lie within their combined error radius.
///
/// Two results are close when both parameter deltas are below
/// `max(√2 · (err + err'), epsilon)`; of each close pair the lower-err
/// member survives, with ties going to the lower index.
fn dedup(results: Vec<Intersection>, epsilon: f64) -> Vec<Intersection> {
    let mut removed = vec![false; results.len()];
    for i in 0..results.len() {
        if removed[i] {
            continue;
        }
        for j in (i + 1)..results.len() {
            if removed[j] {
                continue;
            }
            let radius = (std::f64::consts::SQRT_2 * (results[i].err + results[j].err))
                .max(epsilon);
            if (results[i].t1 - results[j].t1).abs() < radius
                && (results[i].t2 - results[j].t2).abs() < radius
            {
                if results[j].err < results[i].err {
                    removed[i] = true;
                    break;
                } else {
                    removed[j] = true;
                }
            }
        }
    }
    results
        .into_iter()
        .zip(removed)
        .filter(|(_, r)| !r)
        .map(|(x, _)| x)
        .collect()
}

/// Compute the intersections of two edges.
///
/// `depth` bounds the subdivision; branches that reach it report their
/// interval center with error radius `2^-depth`. `epsilon` is the
/// parameter-space tolerance ([`DEFAULT_EPSILON`] is a good default) and
/// `max_iter` bounds the total number of processed subdivision tasks, with
/// a negative value meaning unlimited.
///
/// Pairs of line segments take the exact [`line_intersections`] path.
/// Overlapping edges are [`Intersections::Indeterminate`]; so are
/// configurations that yield more distinct exact crossings than the
/// product of the edges' degrees (the Bézout bound), which can only
/// happen when the edges coincide over an interval.
pub fn intersections<T, U>(
    curve1: &T,
    curve2: &U,
    depth: usize,
    epsilon: f64,
    max_iter: i64,
) -> Intersections
where
    T: ParamCurveIntersect,
    U: ParamCurveIntersect,
{
    if curve1.degree() == 1 && curve2.degree() == 1 {
        return line_intersections(
            &Line::new(curve1.start(), curve1.end()),
            &Line::new(curve2.start(), curve2.end()),
        );
    }
    let special1 = curve1.extreme_points();
    let special2 = curve2.extreme_points();
    subdivision_intersections(
        curve1, curve2, &special1, &special2, depth, epsilon, max_iter,
    )
}

/// The adaptive subdivision engine behind [`intersections`].
///
/// `special1` and `special2` are the point sets seeded against the
/// opposite edge; [`intersections`] passes each edge's extreme points,
/// while the self-intersection driver passes trimmed sets that exclude
/// shared split boundaries.
fn subdivision_intersections<T, U>(
    curve1: &T,
    curve2: &U,
    special1: &[ExtremePoint],
    special2: &[ExtremePoint],
    depth: usize,
    epsilon: f64,
    max_iter: i64,
) -> Intersections
where
    T: ParamCurveIntersect,
    U: ParamCurveIntersect,
{
    let bezout = curve1.degree() * curve2.degree();
    let mut queue: VecDeque<Task<T, U>> = VecDeque::new();
    for ep1 in special1 {
        for ep2 in special2 {
            queue.push_back(Task {
                depth: 0,
                t1: ep1.t,
                t2: ep2.t,
                kind: TaskKind::PointPoint(ep1.point, ep2.point),
            });
        }
    }
    for ep1 in special1 {
        queue.push_back(Task {
            depth: 0,
            t1: ep1.t,
            t2: 0.5,
            kind: TaskKind::PointCurve(ep1.point, *curve2),
        });
    }
    for ep2 in special2 {
        queue.push_back(Task {
            depth: 0,
            t1: 0.5,
            t2: ep2.t,
            kind: TaskKind::CurvePoint(*curve1, ep2.point),
        });
    }
    queue.push_back(Task {
        depth: 0,
        t1: 0.5,
        t2: 0.5,
        kind: TaskKind::CurveCurve(*curve1, *curve2),
    });

    let mut results: Vec<Intersection> = Vec::new();
    let mut exact = 0usize;
    let mut iterations: i64 = 0;

    while let Some(task) = queue.pop_front() {
        iterations += 1;
        let out_of_budget = max_iter >= 0 && iterations > max_iter;
        // Interval width and error radius at this task's depth.
        let width = (-(task.depth as f64)).exp2();
        let err = width.max(f64::EPSILON);
        let at_limit = task.depth >= depth || out_of_budget;
        match task.kind {
            TaskKind::PointPoint(p1, p2) => {
                if point_approx_eq(p1, p2, epsilon)
                    && push_exact(&mut results, task.t1, task.t2, p1.midpoint(p2), epsilon)
                {
                    exact += 1;
                    if exact > bezout {
                        return Intersections::Indeterminate;
                    }
                }
            }
            TaskKind::PointCurve(p, curve) => {
                let bbox = curve.bounding_box();
                if bbox.is_point() {
                    // The curve piece has collapsed; compare as points.
                    if point_approx_eq(p, bbox.origin(), epsilon)
                        && push_exact(
                            &mut results,
                            task.t1,
                            task.t2,
                            p.midpoint(bbox.origin()),
                            epsilon,
                        )
                    {
                        exact += 1;
                        if exact > bezout {
                            return Intersections::Indeterminate;
                        }
                    }
                    continue;
                }
                let on_edge = bbox.has_on_edge(p);
                if on_edge {
                    // A boundary touch may be a tangent contact at one of
                    // the piece's extreme points.
                    for ep in curve.extreme_points() {
                        queue.push_back(Task {
                            depth: task.depth,
                            t1: task.t1,
                            t2: task.t2 + (ep.t - 0.5) * width,
                            kind: TaskKind::PointPoint(p, ep.point),
                        });
                    }
                }
                if !(on_edge || bbox.contains(p)) {
                    continue;
                }
                if at_limit {
                    results.push(Intersection {
                        t1: task.t1,
                        t2: task.t2,
                        point: p.midpoint(curve.eval(0.5)),
                        err,
                    });
                    continue;
                }
                match curve.params_for_point(p, epsilon) {
                    Roots::Indeterminate => return Intersections::Indeterminate,
                    Roots::Finite(roots) => {
                        for &u in &roots {
                            if u > 0.0 && u < 1.0 {
                                let t2 = task.t2 + (u - 0.5) * width;
                                if push_exact(
                                    &mut results,
                                    task.t1,
                                    t2,
                                    p.midpoint(curve.eval(u)),
                                    epsilon,
                                ) {
                                    exact += 1;
                                    if exact > bezout {
                                        return Intersections::Indeterminate;
                                    }
                                }
                            }
                        }
                    }
                }
                let (front, back) = curve.subdivide();
                let quarter = 0.25 * width;
                queue.push_back(Task {
                    depth: task.depth,
                    t1: task.t1,
                    t2: task.t2,
                    kind: TaskKind::PointPoint(p, curve.eval(0.5)),
                });
                queue.push_back(Task {
                    depth: task.depth + 1,
                    t1: task.t1,
                    t2: task.t2 - quarter,
                    kind: TaskKind::PointCurve(p, front),
                });
                queue.push_back(Task {
                    depth: task.depth + 1,
                    t1: task.t1,
                    t2: task.t2 + quarter,
                    kind: TaskKind::PointCurve(p, back),
                });
            }
            TaskKind::CurvePoint(curve, p) => {
                let bbox = curve.bounding_box();
                if bbox.is_point() {
                    if point_approx_eq(bbox.origin(), p, epsilon)
                        && push_exact(
                            &mut results,
                            task.t1,
                            task.t2,
                            bbox.origin().midpoint(p),
                            epsilon,
                        )
                    {
                        exact += 1;
                        if exact > bezout {
                            return Intersections::Indeterminate;
                        }
                    }
                    continue;
                }
                let on_edge = bbox.has_on_edge(p);
                if on_edge {
                    for ep in curve.extreme_points() {
                        queue.push_back(Task {
                            depth: task.depth,
                            t1: task.t1 + (ep.t - 0.5) * width,
                            t2: task.t2,
                            kind: TaskKind::PointPoint(ep.point, p),
                        });
                    }
                }
                if !(on_edge || bbox.contains(p)) {
                    continue;
                }
                if at_limit {
                    results.push(Intersection {
                        t1: task.t1,
                        t2: task.t2,
                        point: curve.eval(0.5).midpoint(p),
                        err,
                    });
                    continue;
                }
                match curve.params_for_point(p, epsilon) {
                    Roots::Indeterminate => return Intersections::Indeterminate,
                    Roots::Finite(roots) => {
                        for &u in &roots {
                            if u > 0.0 && u < 1.0 {
                                let t1 = task.t1 + (u - 0.5) * width;
                                if push_exact(
                                    &mut results,
                                    t1,
                                    task.t2,
                                    curve.eval(u).midpoint(p),
                                    epsilon,
                                ) {
                                    exact += 1;
                                    if exact > bezout {
                                        return Intersections::Indeterminate;
                                    }
                                }
                            }
                        }
                    }
                }
                let (front, back) = curve.subdivide();
                let quarter = 0.25 * width;
                queue.push_back(Task {
                    depth: task.depth,
                    t1: task.t1,
                    t2: task.t2,
                    kind: TaskKind::PointPoint(curve.eval(0.5), p),
                });
                queue.push_back(Task {
                    depth: task.depth + 1,
                    t1: task.t1 - quarter,
                    t2: task.t2,
                    kind: TaskKind::CurvePoint(front, p),
                });
                queue.push_back(Task {
                    depth: task.depth + 1,
                    t1: task.t1 + quarter,
                    t2: task.t2,
                    kind: TaskKind::CurvePoint(back, p),
                });
            }
            TaskKind::CurveCurve(c1, c2) => {
                let bb1 = c1.bounding_box();
                let bb2 = c2.bounding_box();
                if bb1.is_point() {
                    queue.push_back(Task {
                        depth: task.depth,
                        t1: task.t1,
                        t2: task.t2,
                        kind: TaskKind::PointCurve(bb1.origin(), c2),
                    });
                    continue;
                }
                if bb2.is_point() {
                    queue.push_back(Task {
                        depth: task.depth,
                        t1: task.t1,
                        t2: task.t2,
                        kind: TaskKind::CurvePoint(c1, bb2.origin()),
                    });
                    continue;
                }
                if !bb1.overlaps(&bb2) {
                    continue;
                }
                if at_limit {
                    results.push(Intersection {
                        t1: task.t1,
                        t2: task.t2,
                        point: c1.eval(0.5).midpoint(c2.eval(0.5)),
                        err,
                    });
                    continue;
                }
                let allowance = max_deviation(task.depth);
                let dev1 = c1.deviation_from_line();
                let dev2 = c2.deviation_from_line();
                if dev1 < allowance && dev2 < allowance {
                    // Both pieces are close to their chords; let the
                    // chords decide whether this branch can contain a
                    // crossing at all.
                    let chord1 = Line::new(c1.start(), c1.end());
                    let chord2 = Line::new(c2.start(), c2.end());
                    match line_params(&chord1, &chord2) {
                        LineCrossing::Collinear => {
                            if dev1 == 0.0 && dev2 == 0.0 {
                                // Both pieces lie exactly on one line.
                                return Intersections::Indeterminate;
                            }
                        }
                        LineCrossing::None => continue,
                        LineCrossing::At(..) => {}
                    }
                }
                let (c1a, c1b) = c1.subdivide();
                let (c2a, c2b) = c2.subdivide();
                let m1 = c1.eval(0.5);
                let m2 = c2.eval(0.5);
                let quarter = 0.25 * width;
                let child = task.depth + 1;
                queue.push_back(Task {
                    depth: task.depth,
                    t1: task.t1,
                    t2: task.t2,
                    kind: TaskKind::PointPoint(m1, m2),
                });
                queue.push_back(Task {
                    depth: child,
                    t1: task.t1,
                    t2: task.t2 - quarter,
                    kind: TaskKind::PointCurve(m1, c2a),
                });
                queue.push_back(Task {
                    depth: child,
                    t1: task.t1,
                    t2: task.t2 + quarter,
                    kind: TaskKind::PointCurve(m1, c2b),
                });
                queue.push_back(Task {
                    depth: child,
                    t1: task.t1 - quarter,
                    t2: task.t2,
                    kind: TaskKind::CurvePoint(c1a, m2),
                });
                queue.push_back(Task {
                    depth: child,
                    t1: task.t1 + quarter,
                    t2: task.t2,
                    kind: TaskKind::CurvePoint(c1b, m2),
                });
                queue.push_back(Task {
                    depth: child,
                    t1: task.t1 - quarter,
                    t2: task.t2 - quarter,
                    kind: TaskKind::CurveCurve(c1a, c2a),
                });
                queue.push_back(Task {
                    depth: child,
                    t1: task.t1 - quarter,
                    t2: task.t2 + quarter,
                    kind: TaskKind::CurveCurve(c1a, c2b),
                });
                queue.push_back(Task {
                    depth: child,
                    t1: task.t1 + quarter,
                    t2: task.t2 - quarter,
                    kind: TaskKind::CurveCurve(c1b, c2a),
                });
                queue.push_back(Task {
                    depth: child,
                    t1: task.t1 + quarter,
                    t2: task.t2 + quarter,
                    kind: TaskKind::CurveCurve(c1b, c2b),
                });
            }
        }
    }
    Intersections::Finite(dedup(results, epsilon))
}

/// Compute the points at which an edge crosses itself.
///
/// Only a cubic can self-intersect; lines and quadratics yield an empty
/// list. The edge is split at its extreme points into pieces monotonic in
/// both coordinates, and every disjoint pair of pieces is intersected with
/// the shared split boundaries excluded from the seeded point sets, so the
/// inevitable contact between neighbors is not reported.
pub fn self_intersections<T>(
    curve: &T,
    depth: usize,
    epsilon: f64,
    max_iter: i64,
) -> Intersections
where
    T: ParamCurveIntersect,
{
    let mut ts: Vec<f64> = vec![0.0];
    ts.extend(curve.extrema());
    ts.push(1.0);
    let segments = ts.len() - 1;
    let mut results = Vec::new();
    for i in 0..segments {
        for j in (i + 1)..segments {
            let seg_i = curve.subsegment(ts[i]..ts[i + 1]);
            let seg_j = curve.subsegment(ts[j]..ts[j + 1]);
            let mut special_i = Vec::with_capacity(2);
            if i == 0 {
                special_i.push(ExtremePoint {
                    t: 0.0,
                    point: seg_i.start(),
                });
            }
            if j != i + 1 {
                special_i.push(ExtremePoint {
                    t: 1.0,
                    point: seg_i.end(),
                });
            }
            let special_j = [ExtremePoint {
                t: 1.0,
                point: seg_j.end(),
            }];
            match subdivision_intersections(
                &seg_i, &seg_j, &special_i, &special_j, depth, epsilon, max_iter,
            ) {
                Intersections::Indeterminate => return Intersections::Indeterminate,
                Intersections::Finite(list) => {
                    let ratio_i = ts[i + 1] - ts[i];
                    let ratio_j = ts[j + 1] - ts[j];
                    for r in list {
                        results.push(Intersection {
                            t1: ts[i] + ratio_i * r.t1,
                            t2: ts[j] + ratio_j * r.t2,
                            ..r
                        });
                    }
                }
            }
        }
    }
    Intersections::Finite(dedup(results, epsilon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::real::approx_eq;
    use crate::{CubicBez, QuadBez};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn finite(result: Intersections) -> Vec<Intersection> {
        result.finite().expect("expected finitely many intersections")
    }

    #[test]
    fn lines_crossing() {
        let list = finite(line_intersections(
            &Line::new((0.0, 0.0), (3.0, 3.0)),
            &Line::new((0.0, 2.0), (2.0, 2.0)),
        ));
        assert_eq!(list.len(), 1);
        assert!(approx_eq(list[0].t1, 2.0 / 3.0, 1e-8));
        assert!(approx_eq(list[0].t2, 1.0, 1e-8));
        assert!(approx_eq(list[0].point.x, 2.0, 1e-8));
        assert!(approx_eq(list[0].point.y, 2.0, 1e-8));
        assert_eq!(list[0].err, 0.0);
    }

    #[test]
    fn lines_collinear_overlapping() {
        let result = line_intersections(
            &Line::new((0.0, 0.0), (3.0, 3.0)),
            &Line::new((0.0, 0.0), (2.0, 2.0)),
        );
        assert!(result.is_indeterminate());
    }

    #[test]
    fn lines_parallel() {
        let list = finite(line_intersections(
            &Line::new((0.0, 0.0), (2.0, 2.0)),
            &Line::new((1.0, 0.0), (3.0, 2.0)),
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn lines_disjoint() {
        let list = finite(line_intersections(
            &Line::new((0.0, 0.0), (1.0, 1.0)),
            &Line::new((5.0, 5.0), (6.0, 5.0)),
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn lines_shared_endpoint() {
        // The boxes only touch, so the crossing is found by endpoint
        // matching.
        let list = finite(line_intersections(
            &Line::new((0.0, 0.0), (1.0, 1.0)),
            &Line::new((1.0, 1.0), (2.0, 0.0)),
        ));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].t1, 1.0);
        assert_eq!(list[0].t2, 0.0);
        assert_eq!(list[0].err, 0.0);
    }

    #[test]
    fn lines_nonoverlapping_collinear() {
        // Collinear but disjoint: finitely many (zero) intersections.
        let list = finite(line_intersections(
            &Line::new((0.0, 0.0), (1.0, 1.0)),
            &Line::new((2.0, 2.0), (3.0, 3.0)),
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn random_lines_crossing() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            // Two segments through a common interior point.
            let c = Point::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
            let d1 = crate::Vec2::new(rng.gen_range(0.1..2.0), rng.gen_range(0.1..2.0));
            let d2 = crate::Vec2::new(-rng.gen_range(0.1..2.0), rng.gen_range(0.1..2.0));
            let l1 = Line::new(c - d1, c + d1);
            let l2 = Line::new(c - d2, c + d2);
            let list = finite(line_intersections(&l1, &l2));
            assert_eq!(list.len(), 1);
            assert!(approx_eq(list[0].t1, 0.5, 1e-9));
            assert!(approx_eq(list[0].t2, 0.5, 1e-9));
            assert!(list[0].point.distance(c) < 1e-9);
        }
    }

    #[test]
    fn line_quad() {
        let line = Line::new((1.0, 0.0), (1.0, 2.0));
        let quad = QuadBez::new((0.0, 0.0), (3.0, 1.0), (0.0, 2.0));
        let list = finite(intersections(&line, &quad, 20, DEFAULT_EPSILON, -1));
        assert_eq!(list.len(), 2);
        for r in &list {
            // Every reported crossing must actually lie on both edges.
            let p1 = line.eval(r.t1);
            let p2 = quad.eval(r.t2);
            assert!(p1.distance(p2) < 1e-4, "{:?} vs {:?}", p1, p2);
        }
    }

    #[test]
    fn quad_quad() {
        let q1 = QuadBez::new((0.0, 1.0), (6.0, 2.0), (0.0, 3.0));
        let q2 = QuadBez::new((1.0, 0.0), (2.0, 6.0), (3.0, 0.0));
        let list = finite(intersections(&q1, &q2, 20, DEFAULT_EPSILON, -1));
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn cubic_cubic_nine() {
        let c1 = CubicBez::new((0.0, 0.0), (1.0, 30.0), (2.0, -27.0), (3.0, 3.0));
        let c2 = CubicBez::new((0.0, 0.0), (30.0, 1.0), (-27.0, 2.0), (3.0, 3.0));
        let list = finite(intersections(&c1, &c2, 20, DEFAULT_EPSILON, -1));
        assert_eq!(list.len(), 9);
        // The shared endpoints are among them, recovered exactly.
        assert!(list
            .iter()
            .any(|r| r.err == 0.0 && r.t1 == 0.0 && r.t2 == 0.0));
        assert!(list
            .iter()
            .any(|r| r.err == 0.0 && r.t1 == 1.0 && r.t2 == 1.0));
    }

    #[test]
    fn intersection_symmetry() {
        let q1 = QuadBez::new((0.0, 1.0), (6.0, 2.0), (0.0, 3.0));
        let q2 = QuadBez::new((1.0, 0.0), (2.0, 6.0), (3.0, 0.0));
        let mut forward = finite(intersections(&q1, &q2, 20, DEFAULT_EPSILON, -1));
        let mut backward = finite(intersections(&q2, &q1, 20, DEFAULT_EPSILON, -1));
        assert_eq!(forward.len(), backward.len());
        let key = |r: &Intersection| (r.t1, r.t2);
        forward.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap());
        backward.sort_by(|a, b| (a.t2, a.t1).partial_cmp(&(b.t2, b.t1)).unwrap());
        for (f, b) in forward.iter().zip(&backward) {
            assert!((f.t1 - b.t2).abs() < 1e-4);
            assert!((f.t2 - b.t1).abs() < 1e-4);
            assert!((f.err - b.err).abs() < 1e-12);
        }
    }

    #[test]
    fn coincident_cubics_indeterminate() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 2.0), (2.0, -1.0), (3.0, 1.0));
        let result = intersections(&c, &c, 20, DEFAULT_EPSILON, -1);
        assert!(result.is_indeterminate());
    }

    #[test]
    fn collinear_line_and_linear_cubic() {
        // A degree-3 parametrization of a straight segment overlapping a
        // plain line.
        let line = Line::new((0.0, 0.0), (3.0, 3.0));
        let cubic = CubicBez::new((1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0));
        let result = intersections(&line, &cubic, 20, DEFAULT_EPSILON, -1);
        assert!(result.is_indeterminate());
    }

    #[test]
    fn bounded_iterations_stay_finite() {
        let q1 = QuadBez::new((0.0, 1.0), (6.0, 2.0), (0.0, 3.0));
        let q2 = QuadBez::new((1.0, 0.0), (2.0, 6.0), (3.0, 0.0));
        let result = intersections(&q1, &q2, 20, DEFAULT_EPSILON, 40);
        // The budget stops refinement early; whatever is reported must
        // carry a non-trivial error radius rather than fail.
        if let Intersections::Finite(list) = result {
            for r in &list {
                assert!(r.err >= 0.0);
                assert!((0.0..=1.0).contains(&r.t1) && (0.0..=1.0).contains(&r.t2));
            }
        }
    }

    #[test]
    fn cubic_self_intersection() {
        let c = CubicBez::new((0.0, 0.0), (8.0, 0.0), (1.0, -7.0), (1.0, 1.0));
        let list = finite(self_intersections(&c, 20, DEFAULT_EPSILON, -1));
        assert_eq!(list.len(), 1);
        let r = &list[0];
        assert!(r.t1 < r.t2);
        // The two branches pass through the same point.
        assert!(c.eval(r.t1).distance(c.eval(r.t2)) < 1e-4);
    }

    #[test]
    fn smooth_curves_do_not_self_intersect() {
        let line = Line::new((0.0, 0.0), (2.0, 1.0));
        assert!(finite(self_intersections(&line, 20, DEFAULT_EPSILON, -1)).is_empty());

        let quad = QuadBez::new((0.0, 0.0), (3.0, 1.0), (0.0, 2.0));
        assert!(finite(self_intersections(&quad, 20, DEFAULT_EPSILON, -1)).is_empty());

        let cubic = CubicBez::new((0.0, 0.0), (1.0, 2.0), (2.0, -1.0), (3.0, 1.0));
        assert!(finite(self_intersections(&cubic, 20, DEFAULT_EPSILON, -1)).is_empty());
    }

    #[test]
    fn bounding_box_contains_random_points() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut coord = || rng.gen_range(-10.0..10.0);
            let c = CubicBez::new(
                (coord(), coord()),
                (coord(), coord()),
                (coord(), coord()),
                (coord(), coord()),
            );
            let bbox = c.bounding_box();
            let mut rng2 = StdRng::seed_from_u64(11);
            for _ in 0..100 {
                let p = c.eval(rng2.gen_range(0.0..1.0));
                let eps = 1e-9;
                assert!(p.x >= bbox.x0 - eps && p.x <= bbox.x1 + eps);
                assert!(p.y >= bbox.y0 - eps && p.y <= bbox.y1 + eps);
            }
        }
    }

    #[test]
    fn params_round_trip_random() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let mut coord = || rng.gen_range(-10.0..10.0);
            let c = CubicBez::new(
                (coord(), coord()),
                (coord(), coord()),
                (coord(), coord()),
                (coord(), coord()),
            );
            let mut rng2 = StdRng::seed_from_u64(5);
            for _ in 0..10 {
                let t = rng2.gen_range(0.0..1.0);
                let p = c.eval(t);
                match c.params_for_point(p, 1e-9) {
                    Roots::Indeterminate => {}
                    Roots::Finite(ts) => {
                        assert!(
                            ts.iter().any(|&u| approx_eq(u, t, 1e-6)),
                            "missing {t} in {ts:?} for {c:?}"
                        );
                    }
                }
            }
        }
    }
}
