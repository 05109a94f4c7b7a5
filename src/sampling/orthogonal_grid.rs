//! Regular-grid viewpoint enumeration.
use glam::DVec2;
use tracing::warn;

use crate::error::Result;
use crate::map::MapConfig;
use crate::obstacle::Obstacle;
use crate::sampling::SampleDomain;

/// Enumerate every valid viewpoint on a square grid of spacing `map.cell`
/// over the bounding box, x-major.
///
/// Grid points outside the navigable disc, inside filled obstacles, or
/// within `map.line_width` of an unfilled obstacle segment are dropped. An
/// empty result is legal (a caller may have fenced off the whole disc) but
/// logged.
pub fn orthogonal_grid(map: &MapConfig, obstacles: &[Obstacle]) -> Result<Vec<DVec2>> {
    map.validate()?;

    let domain = SampleDomain::new(map, obstacles);
    let columns = (map.width / map.cell).floor() as usize;
    let rows = (map.height / map.cell).floor() as usize;

    let mut points = Vec::new();
    for i in 0..=columns {
        let x = i as f64 * map.cell;
        for j in 0..=rows {
            let y = j as f64 * map.cell;
            let p = DVec2::new(x, y);
            if domain.accepts(p) {
                points.push(p);
            }
        }
    }

    if points.is_empty() {
        warn!("orthogonal grid produced no valid viewpoints");
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{distance, distance_to_segment};
    use crate::obstacle::Segment;

    #[test]
    fn all_points_lie_inside_the_navigable_disc() {
        let map = MapConfig::default();
        let points = orthogonal_grid(&map, &[]).unwrap();
        assert!(!points.is_empty());
        for p in &points {
            assert!(distance(*p, map.center) <= map.radius);
            assert_eq!(p.x % map.cell, 0.0);
            assert_eq!(p.y % map.cell, 0.0);
        }
    }

    #[test]
    fn filled_circle_carves_a_hole() {
        let map = MapConfig::default();
        let center = DVec2::new(300.0, 300.0);
        let obstacles = vec![Obstacle::circle(center, 50.0, 48, true)];
        let points = orthogonal_grid(&map, &obstacles).unwrap();
        assert!(!points.is_empty());
        for p in points {
            assert!(distance(p, center) >= 50.0);
        }
    }

    #[test]
    fn line_clearance_is_respected() {
        let map = MapConfig::default();
        let wall = Segment::new(DVec2::new(150.0, 100.0), DVec2::new(150.0, 500.0));
        let obstacles = vec![Obstacle::Line(wall)];
        let points = orthogonal_grid(&map, &obstacles).unwrap();
        for p in points {
            assert!(distance_to_segment(p, &wall) > map.line_width);
        }
    }

    #[test]
    fn invalid_config_is_surfaced() {
        let map = MapConfig {
            cell: -1.0,
            ..MapConfig::default()
        };
        assert!(orthogonal_grid(&map, &[]).is_err());
    }

    #[test]
    fn grid_order_is_x_major() {
        let map = MapConfig {
            width: 60.0,
            height: 60.0,
            center: DVec2::new(30.0, 30.0),
            radius: 100.0,
            cell: 30.0,
            line_width: 0.0,
        };
        let points = orthogonal_grid(&map, &[]).unwrap();
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], DVec2::new(0.0, 0.0));
        assert_eq!(points[1], DVec2::new(0.0, 30.0));
        assert_eq!(points[3], DVec2::new(30.0, 0.0));
    }
}
