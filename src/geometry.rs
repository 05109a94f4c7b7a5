//! Low-level geometric primitives shared by the ray caster, feature
//! extractor, and samplers.
//!
//! All predicates are epsilon-tolerant with the absolute [`EPSILON`] used
//! consistently across the crate, so boundary classification stays stable
//! between the casting and sampling paths.
use glam::DVec2;

use crate::obstacle::Segment;

/// Absolute tolerance for determinant, parameter, and denominator tests.
pub const EPSILON: f64 = 1e-9;

/// Euclidean distance between two points.
#[inline]
pub fn distance(p: DVec2, q: DVec2) -> f64 {
    p.distance(q)
}

/// Distance from `p` to the closest point on the finite segment.
///
/// A zero-length segment degrades to the distance to its (single) endpoint.
pub fn distance_to_segment(p: DVec2, seg: &Segment) -> f64 {
    let d = seg.b - seg.a;
    let length_sq = d.length_squared();
    if length_sq == 0.0 {
        return p.distance(seg.a);
    }

    let t = ((p - seg.a).dot(d) / length_sq).clamp(0.0, 1.0);
    p.distance(seg.a + d * t)
}

/// Intersection of the ray `origin + t * dir` (`t > 0`) with a finite segment.
///
/// Returns `None` when the ray and segment are (near-)parallel. The segment
/// parameter `u` is accepted in `[-EPSILON, 1 + EPSILON]` so rays grazing a
/// shared endpoint of two adjacent segments still register a hit. `dir` does
/// not have to be normalized; `t` is in units of `dir`.
pub fn ray_segment_intersection(origin: DVec2, dir: DVec2, seg: &Segment) -> Option<DVec2> {
    let v = seg.b - seg.a;
    let det = dir.x * v.y - dir.y * v.x;
    if det.abs() < EPSILON {
        return None;
    }

    let w = seg.a - origin;
    let t = (w.x * v.y - w.y * v.x) / det;
    let u = (w.x * dir.y - w.y * dir.x) / det;
    if t > EPSILON && (-EPSILON..=1.0 + EPSILON).contains(&u) {
        Some(origin + dir * t)
    } else {
        None
    }
}

/// Strict interior test against a circle; points on the boundary are outside.
#[inline]
pub fn point_in_circle(p: DVec2, center: DVec2, radius: f64) -> bool {
    p.distance_squared(center) < radius * radius
}

/// Even-odd interior test against a closed segment loop.
///
/// Casts the fixed direction (1, 1) from `p` through
/// [`ray_segment_intersection`] and counts crossings. The direction is
/// intentionally non-unit and shared with the visibility pipeline so both use
/// the same epsilon-tolerant intersection.
pub fn point_in_polygon(p: DVec2, loop_segments: &[Segment]) -> bool {
    let dir = DVec2::new(1.0, 1.0);
    let hits = loop_segments
        .iter()
        .filter(|seg| ray_segment_intersection(p, dir, seg).is_some())
        .count();
    hits % 2 == 1
}

/// Signed shoelace area of a closed vertex loop; 0 for fewer than 3 vertices.
pub fn polygon_area(vertices: &[DVec2]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..n {
        let cur = vertices[i];
        let next = vertices[(i + 1) % n];
        sum += cur.x * next.y - next.x * cur.y;
    }
    sum / 2.0
}

/// Centroid of a closed vertex loop, weighted by signed area.
///
/// `None` when the loop has fewer than 3 vertices or its area vanishes.
pub fn polygon_centroid(vertices: &[DVec2], signed_area: f64) -> Option<DVec2> {
    let n = vertices.len();
    if n < 3 || signed_area == 0.0 {
        return None;
    }

    let mut sum = DVec2::ZERO;
    for i in 0..n {
        let cur = vertices[i];
        let next = vertices[(i + 1) % n];
        let cross = cur.x * next.y - next.x * cur.y;
        sum += (cur + next) * cross;
    }
    Some(sum / (6.0 * signed_area))
}
