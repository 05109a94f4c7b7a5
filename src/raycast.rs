//! Visibility polygon casting.
//!
//! A fan of rays is cast from the viewpoint at evenly spaced angles; each ray
//! keeps its nearest obstacle hit within range, or terminates at `max_range`.
//! The resulting vertex sequence closes implicitly (last vertex connects back
//! to the first) and always has exactly `ray_count` entries. Brute force over
//! all segments is intentional: at tens to low hundreds of segments a spatial
//! index would not pay for itself.
use glam::DVec2;

use crate::error::{Error, Result};
use crate::geometry::ray_segment_intersection;
use crate::obstacle::{flatten_segments, Obstacle, Segment};

/// Ray count used by the reference scene.
pub const DEFAULT_RAY_COUNT: usize = 360;
/// Ray range used by the reference scene.
pub const DEFAULT_RAY_RANGE: f64 = 1000.0;

/// Cast a visibility polygon from `viewpoint` against a flat segment list.
///
/// Returns exactly `ray_count` vertices, one per angle `2πi / ray_count`.
/// A viewpoint inside a filled obstacle produces a degenerate near-zero
/// polygon; that is the caller's geometry to fix, not ours.
pub fn cast_visibility(
    viewpoint: DVec2,
    segments: &[Segment],
    ray_count: usize,
    max_range: f64,
) -> Result<Vec<DVec2>> {
    if ray_count == 0 {
        return Err(Error::InvalidConfig("ray count must be positive".into()));
    }
    if !(max_range > 0.0) {
        return Err(Error::InvalidConfig(format!(
            "ray range must be positive, got {max_range}"
        )));
    }

    let mut vertices = Vec::with_capacity(ray_count);
    for i in 0..ray_count {
        let theta = (i as f64 / ray_count as f64) * std::f64::consts::TAU;
        let dir = DVec2::new(theta.cos(), theta.sin());

        let mut min_t = max_range;
        let mut closest = viewpoint + dir * max_range;
        for seg in segments {
            if let Some(hit) = ray_segment_intersection(viewpoint, dir, seg) {
                // dir is unit length, so t equals the hit distance.
                let t = hit.distance(viewpoint);
                if t < min_t {
                    min_t = t;
                    closest = hit;
                }
            }
        }
        vertices.push(closest);
    }
    Ok(vertices)
}

/// Cast against a scene of obstacles, flattening their segments first.
pub fn cast_scene(
    viewpoint: DVec2,
    obstacles: &[Obstacle],
    ray_count: usize,
    max_range: f64,
) -> Result<Vec<DVec2>> {
    let segments = flatten_segments(obstacles);
    cast_visibility(viewpoint, &segments, ray_count, max_range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_segments(half: f64) -> Vec<Segment> {
        let v = [
            DVec2::new(-half, -half),
            DVec2::new(half, -half),
            DVec2::new(half, half),
            DVec2::new(-half, half),
        ];
        (0..4).map(|i| Segment::new(v[i], v[(i + 1) % 4])).collect()
    }

    #[test]
    fn open_space_rays_terminate_at_max_range() {
        let polygon = cast_visibility(DVec2::ZERO, &[], 8, 100.0).unwrap();
        assert_eq!(polygon.len(), 8);
        for p in polygon {
            assert!((p.distance(DVec2::ZERO) - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn enclosing_box_clips_every_ray() {
        let segments = box_segments(10.0);
        let polygon = cast_visibility(DVec2::ZERO, &segments, 360, 1000.0).unwrap();
        assert_eq!(polygon.len(), 360);
        for p in &polygon {
            let d = p.distance(DVec2::ZERO);
            // Nearest wall is 10 away, corners are 10√2 away.
            assert!(d >= 10.0 - 1e-9 && d <= 10.0 * std::f64::consts::SQRT_2 + 1e-9);
        }
        // Axis-aligned rays hit the walls exactly.
        assert!((polygon[0].x - 10.0).abs() < 1e-9);
        assert!((polygon[90].y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn nearest_of_several_hits_wins() {
        let near = Segment::new(DVec2::new(5.0, -1.0), DVec2::new(5.0, 1.0));
        let far = Segment::new(DVec2::new(8.0, -1.0), DVec2::new(8.0, 1.0));
        let polygon = cast_visibility(DVec2::ZERO, &[far, near], 4, 100.0).unwrap();
        assert!((polygon[0].x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn hit_beyond_max_range_is_ignored() {
        let wall = Segment::new(DVec2::new(50.0, -1.0), DVec2::new(50.0, 1.0));
        let polygon = cast_visibility(DVec2::ZERO, &[wall], 4, 20.0).unwrap();
        assert!((polygon[0].x - 20.0).abs() < 1e-9);
    }

    #[test]
    fn zero_ray_count_is_rejected() {
        assert!(cast_visibility(DVec2::ZERO, &[], 0, 100.0).is_err());
        assert!(cast_visibility(DVec2::ZERO, &[], 8, 0.0).is_err());
    }

    #[test]
    fn cast_scene_matches_flattened_cast() {
        let obstacles = vec![
            Obstacle::line(DVec2::new(5.0, -5.0), DVec2::new(5.0, 5.0)),
            Obstacle::circle(DVec2::new(-20.0, 0.0), 3.0, 16, false),
        ];
        let via_scene = cast_scene(DVec2::ZERO, &obstacles, 90, 200.0).unwrap();
        let segments = flatten_segments(&obstacles);
        let via_segments = cast_visibility(DVec2::ZERO, &segments, 90, 200.0).unwrap();
        assert_eq!(via_scene, via_segments);
    }
}
