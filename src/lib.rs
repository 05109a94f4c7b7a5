#![forbid(unsafe_code)]
//! isovist: visibility-polygon computation and comparison for 2D scenes.
//!
//! Modules:
//! - geometry: epsilon-tolerant primitives (distances, intersections, parity tests)
//! - obstacle/map: scene description (segment-decomposed obstacles, navigable region)
//! - raycast: visibility polygons from a viewpoint
//! - features: scalar/sequence isovist features incl. closed-form radial moments,
//!   memoized per quantized viewpoint in a caller-owned cache
//! - dissimilarity: euclidean/manhattan/cosine metrics over partial feature
//!   vectors, DTW-aware for the radial-length sequence
//! - sampling: orthogonal-grid and blue-noise viewpoint generation
//!
//! Everything is synchronous, single-threaded, pure computation; the only
//! mutable state is the feature cache the caller owns.
pub mod dissimilarity;
pub mod error;
pub mod features;
pub mod geometry;
pub mod map;
pub mod obstacle;
pub mod raycast;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use isovist::prelude::*;`.
pub mod prelude {
    pub use glam::DVec2;

    pub use crate::dissimilarity::{dissimilarity, dtw, Metric};
    pub use crate::error::{Error, Result};
    pub use crate::features::{
        compute_features, FeatureCache, FeatureKey, FeatureValue, FeatureVector, Fingerprint,
    };
    pub use crate::map::MapConfig;
    pub use crate::obstacle::{flatten_segments, Obstacle, Segment, DEFAULT_CIRCLE_SEGMENTS};
    pub use crate::raycast::{cast_scene, cast_visibility, DEFAULT_RAY_COUNT, DEFAULT_RAY_RANGE};
    pub use crate::sampling::{orthogonal_grid, random_grid};
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::prelude::*;

    /// End to end: sample viewpoints, cast, extract, compare.
    #[test]
    fn pipeline_produces_comparable_fingerprints() {
        let map = MapConfig::default();
        let obstacles = vec![
            Obstacle::line(DVec2::new(90.0, 150.0), DVec2::new(90.0, 450.0)),
            Obstacle::circle(DVec2::new(220.0, 250.0), 8.0, 48, true),
            Obstacle::polygon(
                &[
                    DVec2::new(325.0, 120.0),
                    DVec2::new(325.0, 210.0),
                    DVec2::new(345.0, 210.0),
                    DVec2::new(345.0, 120.0),
                ],
                true,
            ),
            Obstacle::arc(
                DVec2::new(441.0, 340.0),
                50.0,
                std::f64::consts::FRAC_PI_2,
                3.0 * std::f64::consts::FRAC_PI_2,
                48,
            ),
        ];

        let mut rng = StdRng::seed_from_u64(11);
        let viewpoints = random_grid(&map, &obstacles, 4, &mut rng).unwrap();
        assert!(!viewpoints.is_empty());

        let keys = [
            FeatureKey::Area,
            FeatureKey::Perimeter,
            FeatureKey::Compactness,
            FeatureKey::RadialLengthSequence,
            FeatureKey::RadialMomentMean,
        ];
        let mut cache = FeatureCache::default();
        let fingerprints: Vec<Fingerprint> = viewpoints
            .iter()
            .map(|&viewpoint| {
                let polygon =
                    cast_scene(viewpoint, &obstacles, DEFAULT_RAY_COUNT, DEFAULT_RAY_RANGE)
                        .unwrap();
                assert_eq!(polygon.len(), DEFAULT_RAY_COUNT);
                Fingerprint {
                    position: viewpoint,
                    features: compute_features(viewpoint, &polygon, &keys, &mut cache),
                }
            })
            .collect();

        for fp in &fingerprints {
            let self_distance = dissimilarity(
                &fp.features,
                &fp.features,
                Metric::Euclidean,
                Some(100.0),
            )
            .unwrap();
            assert!(self_distance.abs() < 1e-9);
        }

        if fingerprints.len() >= 2 {
            let d = dissimilarity(
                &fingerprints[0].features,
                &fingerprints[1].features,
                Metric::Manhattan,
                Some(50.0),
            )
            .unwrap();
            assert!(d.is_finite());
        }
    }
}
