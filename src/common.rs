//! Common mathematical operations: closed-form polynomial root finding.

use std::f64::consts::PI;

use arrayvec::ArrayVec;

/// Real roots of a polynomial of degree at most three.
///
/// The identically zero polynomial is satisfied by every value; that case
/// is reported as [`Roots::Indeterminate`] and is distinct from a
/// polynomial with no real roots, which is an empty [`Roots::Finite`].
/// Upstream, `Indeterminate` propagates to mean "infinitely many
/// intersection candidates".
#[derive(Clone, Debug, PartialEq)]
pub enum Roots {
    /// Every supplied coefficient is zero; any value is a root.
    Indeterminate,
    /// Finitely many real roots, with repeated roots collapsed.
    ///
    /// The order of the roots is not significant.
    Finite(ArrayVec<f64, 3>),
}

impl Roots {
    /// Finitely many roots, namely none.
    #[inline]
    pub fn none() -> Roots {
        Roots::Finite(ArrayVec::new())
    }

    /// Whether the polynomial was identically zero.
    #[inline]
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Roots::Indeterminate)
    }
}

/// Find real roots of a linear equation.
///
/// Returns values of x for which c0 + c1 x = 0.
pub fn solve_linear(c0: f64, c1: f64) -> Roots {
    if c1 == 0.0 {
        return if c0 == 0.0 {
            Roots::Indeterminate
        } else {
            Roots::none()
        };
    }
    let mut result = ArrayVec::new();
    result.push(-c0 / c1);
    Roots::Finite(result)
}

/// Find real roots of a quadratic equation.
///
/// Returns values of x for which c0 + c1 x + c2 x² = 0. Degrades to the
/// linear solver when `c2` is zero.
///
/// When the discriminant is positive, the root on the same side as `c1` is
/// computed directly and the other is recovered from the product of roots,
/// avoiding the catastrophic cancellation of the textbook formula.
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> Roots {
    if c2 == 0.0 {
        return solve_linear(c0, c1);
    }
    let mut result = ArrayVec::new();
    let d = c1 * c1 - 4.0 * c2 * c0;
    if d < 0.0 {
        return Roots::Finite(result);
    }
    if d == 0.0 {
        result.push(-c1 / (2.0 * c2));
        return Roots::Finite(result);
    }
    // See https://math.stackexchange.com/questions/866331
    let q = -0.5 * (c1 + d.sqrt().copysign(c1));
    result.push(q / c2);
    result.push(c0 / q);
    Roots::Finite(result)
}

/// Find real roots of a cubic equation.
///
/// Returns values of x for which c0 + c1 x + c2 x² + c3 x³ = 0. Degrades
/// to the quadratic solver when `c3` is zero.
///
/// The equation is first depressed to monic form; the three-real-root case
/// is evaluated trigonometrically, and the one-real-root case picks the
/// cube-root branch by the sign of the depressed linear term so that the
/// two Cardano radicals never cancel subtractively.
pub fn solve_cubic(c0: f64, c1: f64, c2: f64, c3: f64) -> Roots {
    if c3 == 0.0 {
        return solve_quadratic(c0, c1, c2);
    }
    let a0 = c0 / c3;
    let a1 = c1 / c3;
    let a2 = c2 / c3;
    let p = 3.0 * a1 - a2 * a2;
    let q = 27.0 * a0 - 9.0 * a1 * a2 + 2.0 * a2 * a2 * a2;
    let d = q * q + 4.0 * p * p * p;
    let mut result = ArrayVec::new();
    if d < 0.0 {
        // Three distinct real roots.
        let sq = (-d).sqrt();
        let rc = (0.25 * (q * q + sq * sq)).powf(1.0 / 6.0);
        let phi = sq.atan2(-q);
        for k in [0.0, 1.0, -1.0] {
            let th = (phi + 2.0 * PI * k) / 3.0;
            result.push((2.0 * rc * th.cos() - a2) / 3.0);
        }
    } else if d == 0.0 {
        // Repeated roots.
        if q == 0.0 {
            result.push(-a2 / 3.0);
        } else {
            let rc = (-0.5 * q).cbrt();
            result.push((2.0 * rc - a2) / 3.0);
            result.push((-rc - a2) / 3.0);
        }
    } else {
        // One real root.
        let sq = d.sqrt();
        let (rc1, rc2);
        if q >= 0.0 {
            rc2 = (0.5 * (-q - sq)).cbrt();
            rc1 = -p / rc2;
        } else {
            rc1 = (0.5 * (-q + sq)).cbrt();
            rc2 = -p / rc1;
        }
        result.push((rc1 + rc2 - a2) / 3.0);
    }
    Roots::Finite(result)
}
