//! Viewpoint sampling over the navigable region.
//!
//! Two strategies generate candidate viewpoints inside the map's navigable
//! disc: a deterministic orthogonal grid and a stochastic blue-noise sampler.
//! Both reject the same positions: outside the disc, inside a filled
//! obstacle, or closer than the configured line width to an unfilled
//! obstacle segment.
use glam::DVec2;
use rand::RngCore;

use crate::geometry::{distance, distance_to_segment};
use crate::map::MapConfig;
use crate::obstacle::{Obstacle, Segment};

pub mod best_candidate;
pub mod orthogonal_grid;

pub use best_candidate::random_grid;
pub use orthogonal_grid::orthogonal_grid;

/// Uniform float in [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

/// Precomputed rejection context shared by both samplers.
pub(crate) struct SampleDomain<'a> {
    map: &'a MapConfig,
    filled: Vec<&'a Obstacle>,
    clearance_segments: Vec<Segment>,
}

impl<'a> SampleDomain<'a> {
    pub(crate) fn new(map: &'a MapConfig, obstacles: &'a [Obstacle]) -> Self {
        let filled = obstacles.iter().filter(|o| o.is_filled()).collect();
        let clearance_segments = obstacles
            .iter()
            .filter(|o| !o.is_filled())
            .flat_map(|o| o.segments().iter().copied())
            .collect();
        Self {
            map,
            filled,
            clearance_segments,
        }
    }

    /// Whether `p` is a valid viewpoint.
    pub(crate) fn accepts(&self, p: DVec2) -> bool {
        if distance(p, self.map.center) > self.map.radius {
            return false;
        }
        if self.filled.iter().any(|o| o.contains(p)) {
            return false;
        }
        !self
            .clearance_segments
            .iter()
            .any(|seg| distance_to_segment(p, seg) <= self.map.line_width)
    }
}
