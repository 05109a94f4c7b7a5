//! Obstacle shapes and their segment decompositions.
//!
//! The visibility pipeline only ever sees line segments. Circles and arcs are
//! discretized into segment chains at construction time (default 48 segments
//! per full turn); the segment count is a precision/performance knob, raised
//! to 96 or more when boundary accuracy matters. Filled circles keep their
//! analytic center and radius so interior tests stay exact even though
//! casting works on the chords.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{point_in_circle, point_in_polygon};

/// Default number of chords per full circle.
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 48;

/// A finite line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    pub a: DVec2,
    pub b: DVec2,
}

impl Segment {
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self { a, b }
    }
}

/// An opaque obstacle in the scene.
///
/// Obstacles are immutable once built; the engine never mutates or
/// re-discretizes them during a computation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Obstacle {
    /// A single wall segment.
    Line(Segment),
    /// A closed polygon loop; filled polygons have an interior.
    Polygon {
        segments: Vec<Segment>,
        filled: bool,
    },
    /// A full circle, discretized into chords. The analytic center and
    /// radius are kept for interior tests.
    Circle {
        center: DVec2,
        radius: f64,
        segments: Vec<Segment>,
        filled: bool,
    },
    /// An open circular arc. Arcs have no interior.
    Arc {
        center: DVec2,
        radius: f64,
        segments: Vec<Segment>,
    },
}

impl Obstacle {
    /// A single wall segment from `a` to `b`.
    pub fn line(a: DVec2, b: DVec2) -> Self {
        Obstacle::Line(Segment::new(a, b))
    }

    /// A closed polygon from a vertex loop. Consecutive vertices (and the
    /// last back to the first) become segments.
    pub fn polygon(vertices: &[DVec2], filled: bool) -> Self {
        let n = vertices.len();
        let segments = (0..n)
            .map(|i| Segment::new(vertices[i], vertices[(i + 1) % n]))
            .collect();
        Obstacle::Polygon { segments, filled }
    }

    /// A full circle discretized into `segment_count` chords.
    pub fn circle(center: DVec2, radius: f64, segment_count: usize, filled: bool) -> Self {
        let segments = arc_segments(center, radius, 0.0, std::f64::consts::TAU, segment_count);
        Obstacle::Circle {
            center,
            radius,
            segments,
            filled,
        }
    }

    /// An open arc from `start_angle` to `end_angle` (radians, may run
    /// clockwise when `end_angle < start_angle`).
    pub fn arc(
        center: DVec2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        segment_count: usize,
    ) -> Self {
        let segments = arc_segments(center, radius, start_angle, end_angle, segment_count);
        Obstacle::Arc {
            center,
            radius,
            segments,
        }
    }

    /// The segment decomposition seen by the ray caster and samplers.
    pub fn segments(&self) -> &[Segment] {
        match self {
            Obstacle::Line(seg) => std::slice::from_ref(seg),
            Obstacle::Polygon { segments, .. }
            | Obstacle::Circle { segments, .. }
            | Obstacle::Arc { segments, .. } => segments,
        }
    }

    /// Whether the obstacle has a solid interior.
    pub fn is_filled(&self) -> bool {
        match self {
            Obstacle::Polygon { filled, .. } | Obstacle::Circle { filled, .. } => *filled,
            Obstacle::Line(_) | Obstacle::Arc { .. } => false,
        }
    }

    /// Strict interior test. Always false for unfilled obstacles, lines,
    /// and arcs. Filled circles test against the analytic radius; filled
    /// polygons use the even-odd rule over the segment loop.
    pub fn contains(&self, p: DVec2) -> bool {
        match self {
            Obstacle::Circle {
                center,
                radius,
                filled: true,
                ..
            } => point_in_circle(p, *center, *radius),
            Obstacle::Polygon {
                segments,
                filled: true,
            } => point_in_polygon(p, segments),
            _ => false,
        }
    }
}

/// Collect every segment of every obstacle into one flat list, the shape the
/// ray caster consumes.
pub fn flatten_segments(obstacles: &[Obstacle]) -> Vec<Segment> {
    obstacles
        .iter()
        .flat_map(|o| o.segments().iter().copied())
        .collect()
}

fn arc_segments(
    center: DVec2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    segment_count: usize,
) -> Vec<Segment> {
    let count = segment_count.max(1);
    let step = (end_angle - start_angle) / count as f64;
    (0..count)
        .map(|i| {
            let a1 = start_angle + i as f64 * step;
            let a2 = a1 + step;
            Segment::new(
                center + radius * DVec2::new(a1.cos(), a1.sin()),
                center + radius * DVec2::new(a2.cos(), a2.sin()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_discretization_closes_the_loop() {
        let c = Obstacle::circle(DVec2::new(10.0, -4.0), 5.0, 48, false);
        let segments = c.segments();
        assert_eq!(segments.len(), 48);
        let first = segments[0];
        let last = segments[segments.len() - 1];
        assert!(last.b.distance(first.a) < 1e-9);
        for seg in segments {
            assert!((seg.a.distance(DVec2::new(10.0, -4.0)) - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn arc_spans_requested_angles() {
        use std::f64::consts::PI;
        let a = Obstacle::arc(DVec2::ZERO, 2.0, PI / 2.0, 3.0 * PI / 2.0, 24);
        let segments = a.segments();
        assert_eq!(segments.len(), 24);
        assert!(segments[0].a.distance(DVec2::new(0.0, 2.0)) < 1e-9);
        assert!(segments[23].b.distance(DVec2::new(0.0, -2.0)) < 1e-9);
        assert!(!a.is_filled());
        assert!(!a.contains(DVec2::ZERO));
    }

    #[test]
    fn filled_circle_contains_uses_analytic_radius() {
        let c = Obstacle::circle(DVec2::new(300.0, 300.0), 50.0, 48, true);
        assert!(c.contains(DVec2::new(300.0, 310.0)));
        assert!(!c.contains(DVec2::new(300.0, 351.0)));
        // On the analytic boundary: strictly outside.
        assert!(!c.contains(DVec2::new(300.0, 350.0)));
    }

    #[test]
    fn filled_polygon_contains_interior_point() {
        let square = Obstacle::polygon(
            &[
                DVec2::new(0.0, 0.0),
                DVec2::new(4.0, 0.0),
                DVec2::new(4.0, 4.0),
                DVec2::new(0.0, 4.0),
            ],
            true,
        );
        assert!(square.contains(DVec2::new(2.0, 2.0)));
        assert!(!square.contains(DVec2::new(5.0, 2.0)));

        let outline = Obstacle::polygon(
            &[
                DVec2::new(0.0, 0.0),
                DVec2::new(4.0, 0.0),
                DVec2::new(4.0, 4.0),
                DVec2::new(0.0, 4.0),
            ],
            false,
        );
        assert!(!outline.contains(DVec2::new(2.0, 2.0)));
    }

    #[test]
    fn flatten_preserves_order_and_counts() {
        let obstacles = vec![
            Obstacle::line(DVec2::ZERO, DVec2::new(1.0, 0.0)),
            Obstacle::circle(DVec2::ZERO, 1.0, 8, false),
        ];
        let segments = flatten_segments(&obstacles);
        assert_eq!(segments.len(), 9);
        assert_eq!(segments[0].b, DVec2::new(1.0, 0.0));
    }
}
