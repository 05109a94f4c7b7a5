//! Closed-form angular moments of the radial distance field.
//!
//! For each boundary triangle (viewpoint plus two consecutive polygon
//! vertices) the integrals of r, r² and r³ over the apex wedge have closed
//! forms in the triangle's side lengths and internal angles. Summing them
//! and normalizing by 2π yields raw moments of radial distance over angle
//! that do not depend on the ray count, unlike a discrete estimate from the
//! per-ray samples.
//!
//! The formulas blow up on degenerate triangles. Any triangle with a
//! (near-)zero side, an unstable trigonometric denominator, or a non-finite
//! term is skipped rather than poisoning the aggregate; when every triangle
//! is skipped all three moments are 0.
use glam::DVec2;

use crate::geometry::EPSILON;

/// First three central moments (mean, variance, skewness) of the angular
/// distribution of radial distance around `viewpoint`.
pub(crate) fn radial_moments(viewpoint: DVec2, polygon: &[DVec2]) -> (f64, f64, f64) {
    let n = polygon.len();
    if n < 3 {
        return (0.0, 0.0, 0.0);
    }

    let mut sum1 = 0.0;
    let mut sum2 = 0.0;
    let mut sum3 = 0.0;
    for i in 0..n {
        let v1 = polygon[i];
        let v2 = polygon[(i + 1) % n];
        let a = viewpoint.distance(v1);
        let b = viewpoint.distance(v2);
        let c = v1.distance(v2);
        if let Some((t1, t2, t3)) = wedge_terms(a, b, c) {
            sum1 += t1;
            sum2 += t2;
            sum3 += t3;
        }
    }

    let a1 = sum1 / std::f64::consts::TAU;
    let a2 = sum2 / std::f64::consts::TAU;
    let a3 = sum3 / std::f64::consts::TAU;

    let m1 = a1;
    let m2 = a2 - a1 * a1;
    let m3 = a3 - 3.0 * a1 * a2 + 2.0 * a1 * a1 * a1;
    (
        finite_or_zero(m1),
        finite_or_zero(m2),
        finite_or_zero(m3),
    )
}

/// Wedge integrals of r, r² and r³ for one boundary triangle with
/// viewpoint-to-vertex sides `a`, `b` and opposite side `c`.
///
/// `None` means the triangle is numerically unusable and must be skipped.
fn wedge_terms(a: f64, b: f64, c: f64) -> Option<(f64, f64, f64)> {
    if a < EPSILON || b < EPSILON || c < EPSILON {
        return None;
    }

    // Law of cosines, clamped so floating-point overshoot cannot push the
    // ratio outside acos's domain. gamma is the apex angle at the viewpoint,
    // alpha and beta sit at the two polygon vertices.
    let cos_gamma = ((a * a + b * b - c * c) / (2.0 * a * b)).clamp(-1.0, 1.0);
    let cos_alpha = ((a * a + c * c - b * b) / (2.0 * a * c)).clamp(-1.0, 1.0);
    let cos_beta = ((b * b + c * c - a * a) / (2.0 * b * c)).clamp(-1.0, 1.0);
    let gamma = cos_gamma.acos();
    let alpha = cos_alpha.acos();
    let beta = cos_beta.acos();
    if gamma.is_nan() || alpha.is_nan() || beta.is_nan() {
        return None;
    }

    let sin_gamma = gamma.sin();
    let sin_alpha = alpha.sin();
    let sin_beta = beta.sin();
    if gamma < EPSILON || sin_gamma < EPSILON || sin_alpha < EPSILON || sin_beta < EPSILON {
        return None;
    }

    let log_denom = a * b * sin_gamma * sin_gamma;
    if log_denom < EPSILON {
        return None;
    }
    let log_arg = ((c + a - b * cos_gamma) * (c + b - a * cos_gamma)) / log_denom;
    if !(log_arg > 0.0) {
        return None;
    }

    let t1 = (a * b / c) * (sin_gamma / gamma) * log_arg.ln();

    // Altitude from the viewpoint onto the far side.
    let h = a * b * sin_gamma / c;
    let cot_alpha = cos_alpha / sin_alpha;
    let cot_beta = cos_beta / sin_beta;
    let csc_alpha = 1.0 / sin_alpha;
    let csc_beta = 1.0 / sin_beta;

    let t2 = (h * h / gamma) * (cot_alpha + cot_beta);
    let t3 = (h * h * h / (2.0 * gamma))
        * (cot_alpha * csc_alpha
            + cot_beta * csc_beta
            + ((csc_alpha + cot_alpha) * (csc_beta + cot_beta)).ln());

    if t1.is_finite() && t2.is_finite() && t3.is_finite() {
        Some((t1, t2, t3))
    } else {
        None
    }
}

#[inline]
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
