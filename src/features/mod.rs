//! Feature extraction from visibility polygons.
//!
//! A [`FeatureVector`] is a sparse mapping from [`FeatureKey`] to scalar
//! values; the one sequence-valued key, [`FeatureKey::RadialLengthSequence`],
//! carries the full ordered per-vertex distance list. Vectors stay partial on
//! purpose so runs with different feature configurations remain comparable.
//!
//! Every stored scalar is finite: numeric singularities (empty polygons, zero
//! perimeters, degenerate centroids, unstable moment triangles) fall back to
//! 0 instead of storing a NaN.
use std::collections::HashMap;

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::features::moments::finite_or_zero;
use crate::geometry::{distance, polygon_area, polygon_centroid};

pub mod cache;
pub(crate) mod moments;

pub use cache::FeatureCache;

/// The isovist features the extractor knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FeatureKey {
    /// Absolute polygon area (shoelace, halved).
    Area,
    /// Boundary length around the closed vertex loop.
    Perimeter,
    /// Isoperimetric quotient `4π·area / perimeter²`; 1 for a circle.
    Compactness,
    /// Distance from the viewpoint to the polygon centroid.
    Drift,
    RadialLengthMin,
    RadialLengthMean,
    RadialLengthMax,
    /// The designated sequence key: ordered per-vertex viewpoint distances.
    RadialLengthSequence,
    /// Analytic first moment of radial distance over angle.
    RadialMomentMean,
    /// Analytic second central moment.
    RadialMomentVariance,
    /// Analytic third central moment.
    RadialMomentSkewness,
    /// Placeholder, always 0. No formula is defined yet.
    Occlusivity,
    /// Placeholder, always 0. No formula is defined yet.
    VisiblePerimeter,
}

impl FeatureKey {
    /// Every key, in declaration order.
    pub const ALL: [FeatureKey; 13] = [
        FeatureKey::Area,
        FeatureKey::Perimeter,
        FeatureKey::Compactness,
        FeatureKey::Drift,
        FeatureKey::RadialLengthMin,
        FeatureKey::RadialLengthMean,
        FeatureKey::RadialLengthMax,
        FeatureKey::RadialLengthSequence,
        FeatureKey::RadialMomentMean,
        FeatureKey::RadialMomentVariance,
        FeatureKey::RadialMomentSkewness,
        FeatureKey::Occlusivity,
        FeatureKey::VisiblePerimeter,
    ];

    /// Whether the key's value is an ordered sequence instead of a scalar.
    pub fn is_sequence(self) -> bool {
        matches!(self, FeatureKey::RadialLengthSequence)
    }
}

/// A single feature value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FeatureValue {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl FeatureValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            FeatureValue::Scalar(v) => Some(*v),
            FeatureValue::Sequence(_) => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[f64]> {
        match self {
            FeatureValue::Sequence(v) => Some(v),
            FeatureValue::Scalar(_) => None,
        }
    }
}

/// A sparse feature vector: only requested keys are present.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureVector {
    values: HashMap<FeatureKey, FeatureValue>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: FeatureKey, value: FeatureValue) {
        self.values.insert(key, value);
    }

    /// Convenience for scalar keys.
    pub fn insert_scalar(&mut self, key: FeatureKey, value: f64) {
        self.values.insert(key, FeatureValue::Scalar(value));
    }

    pub fn get(&self, key: FeatureKey) -> Option<&FeatureValue> {
        self.values.get(&key)
    }

    pub fn scalar(&self, key: FeatureKey) -> Option<f64> {
        self.values.get(&key).and_then(FeatureValue::as_scalar)
    }

    pub fn sequence(&self, key: FeatureKey) -> Option<&[f64]> {
        self.values.get(&key).and_then(FeatureValue::as_sequence)
    }

    pub fn contains(&self, key: FeatureKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = FeatureKey> + '_ {
        self.values.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A viewpoint paired with the features observed from it. External tooling
/// compares and visualizes these; the engine only produces them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fingerprint {
    pub position: DVec2,
    pub features: FeatureVector,
}

/// Extract the requested features of a visibility polygon seen from
/// `viewpoint`.
///
/// The polygon is the closed vertex loop produced by the ray caster. The
/// radial-length list and the moment triple are memoized in `cache` per
/// quantized viewpoint; everything else is cheap enough to recompute. The
/// result contains exactly the requested keys.
pub fn compute_features(
    viewpoint: DVec2,
    polygon: &[DVec2],
    keys: &[FeatureKey],
    cache: &mut FeatureCache,
) -> FeatureVector {
    let mut vector = FeatureVector::new();

    let needs_radial = keys.iter().any(|k| {
        matches!(
            k,
            FeatureKey::RadialLengthMin
                | FeatureKey::RadialLengthMean
                | FeatureKey::RadialLengthMax
                | FeatureKey::RadialLengthSequence
        )
    });
    let radial = if needs_radial {
        cache.radial_lengths_or_compute(viewpoint, polygon)
    } else {
        Vec::new()
    };

    let needs_moments = keys.iter().any(|k| {
        matches!(
            k,
            FeatureKey::RadialMomentMean
                | FeatureKey::RadialMomentVariance
                | FeatureKey::RadialMomentSkewness
        )
    });
    let moments = if needs_moments {
        cache.moments_or_compute(viewpoint, polygon)
    } else {
        (0.0, 0.0, 0.0)
    };

    for &key in keys {
        match key {
            FeatureKey::Area => {
                vector.insert_scalar(key, finite_or_zero(area(polygon)));
            }
            FeatureKey::Perimeter => {
                vector.insert_scalar(key, finite_or_zero(perimeter(polygon)));
            }
            FeatureKey::Compactness => {
                let a = area(polygon);
                let p = perimeter(polygon);
                let value = if p == 0.0 {
                    0.0
                } else {
                    4.0 * std::f64::consts::PI * a / (p * p)
                };
                vector.insert_scalar(key, finite_or_zero(value));
            }
            FeatureKey::Drift => {
                let signed = polygon_area(polygon);
                let value = polygon_centroid(polygon, signed)
                    .map(|c| distance(viewpoint, c))
                    .unwrap_or(0.0);
                vector.insert_scalar(key, finite_or_zero(value));
            }
            FeatureKey::RadialLengthMin => {
                let value = radial.iter().copied().fold(f64::INFINITY, f64::min);
                vector.insert_scalar(key, finite_or_zero(value));
            }
            FeatureKey::RadialLengthMean => {
                let value = if radial.is_empty() {
                    0.0
                } else {
                    radial.iter().sum::<f64>() / radial.len() as f64
                };
                vector.insert_scalar(key, finite_or_zero(value));
            }
            FeatureKey::RadialLengthMax => {
                let value = radial.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                vector.insert_scalar(key, finite_or_zero(value));
            }
            FeatureKey::RadialLengthSequence => {
                vector.insert(key, FeatureValue::Sequence(radial.clone()));
            }
            FeatureKey::RadialMomentMean => {
                vector.insert_scalar(key, moments.0);
            }
            FeatureKey::RadialMomentVariance => {
                vector.insert_scalar(key, moments.1);
            }
            FeatureKey::RadialMomentSkewness => {
                vector.insert_scalar(key, moments.2);
            }
            FeatureKey::Occlusivity | FeatureKey::VisiblePerimeter => {
                vector.insert_scalar(key, 0.0);
            }
        }
    }

    vector
}

/// Absolute shoelace area; 0 for fewer than 3 vertices.
fn area(polygon: &[DVec2]) -> f64 {
    polygon_area(polygon).abs()
}

/// Closed-loop perimeter; 0 for fewer than 2 vertices.
fn perimeter(polygon: &[DVec2]) -> f64 {
    let n = polygon.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| distance(polygon[i], polygon[(i + 1) % n]))
        .sum()
}
