//! Per-viewpoint memoization of the expensive feature intermediates.
//!
//! The cache is owned by the caller, never ambient: it maps a quantized
//! viewpoint key to the radial-length list and the analytic moment triple,
//! recomputing lazily on miss. Quantization to six fractional digits keeps
//! floating-point jitter from fragmenting entries for what is effectively
//! the same viewpoint.
//!
//! Obstacle changes are invisible to the cache by design; callers tag their
//! obstacle set with a version and call [`FeatureCache::invalidate`] when it
//! changes. The capacity bound is coarse: a full cache is cleared wholesale
//! before the next insert rather than evicting per entry.
use std::collections::HashMap;

use glam::DVec2;

use crate::features::moments::radial_moments;
use crate::geometry::distance;

/// Fixed decimal precision of the cache key (six fractional digits).
const QUANT_SCALE: f64 = 1e6;

/// Default entry bound.
const DEFAULT_CAPACITY: usize = 4096;

type CacheKey = (i64, i64);

#[derive(Debug, Default)]
struct CacheEntry {
    radial_lengths: Option<Vec<f64>>,
    moments: Option<(f64, f64, f64)>,
}

/// Caller-owned memoization of radial-length lists and moment triples,
/// keyed by quantized viewpoint.
#[derive(Debug)]
pub struct FeatureCache {
    entries: HashMap<CacheKey, CacheEntry>,
    capacity: usize,
    obstacle_version: Option<u64>,
}

impl FeatureCache {
    /// Creates an empty cache holding at most `capacity` viewpoints.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            obstacle_version: None,
        }
    }

    /// Number of cached viewpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Clears the cache when the obstacle set it was filled against has
    /// changed. Callers pass any version tag that moves when obstacles do.
    pub fn invalidate(&mut self, obstacle_version: u64) {
        if self.obstacle_version != Some(obstacle_version) {
            self.entries.clear();
            self.obstacle_version = Some(obstacle_version);
        }
    }

    /// Per-vertex viewpoint distances for `polygon`, memoized. A hit returns
    /// exactly the values a fresh computation would produce.
    pub(crate) fn radial_lengths_or_compute(
        &mut self,
        viewpoint: DVec2,
        polygon: &[DVec2],
    ) -> Vec<f64> {
        let entry = self.entry_mut(quantize(viewpoint));
        entry
            .radial_lengths
            .get_or_insert_with(|| polygon.iter().map(|&p| distance(viewpoint, p)).collect())
            .clone()
    }

    /// Central moment triple (mean, variance, skewness), memoized.
    pub(crate) fn moments_or_compute(
        &mut self,
        viewpoint: DVec2,
        polygon: &[DVec2],
    ) -> (f64, f64, f64) {
        let entry = self.entry_mut(quantize(viewpoint));
        *entry
            .moments
            .get_or_insert_with(|| radial_moments(viewpoint, polygon))
    }

    fn entry_mut(&mut self, key: CacheKey) -> &mut CacheEntry {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        self.entries.entry(key).or_default()
    }
}

impl Default for FeatureCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

fn quantize(p: DVec2) -> CacheKey {
    ((p.x * QUANT_SCALE).round() as i64, (p.y * QUANT_SCALE).round() as i64)
}
