//! Dissimilarity metrics between partial feature vectors.
//!
//! Vectors are sparse, and mismatched key sets are not an error: a key
//! present on one side only contributes its own magnitude, as if the absent
//! side held 0. The sequence-valued key is reduced to a scalar alignment
//! cost via dynamic time warping before it is folded into the accumulator
//! like any other key.
use crate::error::{Error, Result};
use crate::features::{FeatureKey, FeatureVector};

/// Selectable dissimilarity metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Euclidean,
    Manhattan,
    Cosine,
}

/// Symmetric dissimilarity between two partial feature vectors.
///
/// `percent` scopes the sequence feature to its leading
/// `round(len · percent / 100)` elements before alignment; `None` means the
/// full sequence. Values outside `[0, 100]` are rejected.
pub fn dissimilarity(
    a: &FeatureVector,
    b: &FeatureVector,
    metric: Metric,
    percent: Option<f64>,
) -> Result<f64> {
    let percent = percent.unwrap_or(100.0);
    if !(0.0..=100.0).contains(&percent) {
        return Err(Error::InvalidConfig(format!(
            "sequence percent must be in [0, 100], got {percent}"
        )));
    }

    let mut keys: Vec<FeatureKey> = a.keys().collect();
    keys.extend(b.keys().filter(|k| !a.contains(*k)));
    keys.sort_unstable();

    match metric {
        Metric::Euclidean => {
            let mut sum = 0.0;
            for key in keys {
                match pair(a, b, key, percent) {
                    (Some(v1), Some(v2)) => sum += (v1 - v2) * (v1 - v2),
                    (Some(v), None) | (None, Some(v)) => sum += v * v,
                    (None, None) => {}
                }
            }
            Ok(sum.sqrt())
        }
        Metric::Manhattan => {
            let mut sum = 0.0;
            for key in keys {
                match pair(a, b, key, percent) {
                    (Some(v1), Some(v2)) => sum += (v1 - v2).abs(),
                    (Some(v), None) | (None, Some(v)) => sum += v.abs(),
                    (None, None) => {}
                }
            }
            Ok(sum)
        }
        Metric::Cosine => {
            let mut product = 0.0;
            let mut magnitude1 = 0.0;
            let mut magnitude2 = 0.0;
            for key in keys {
                if key.is_sequence() {
                    // The alignment cost is one-sided by construction; its
                    // self-product feeds all three accumulators.
                    if let Some(cost) = sequence_cost(a, b, percent) {
                        product += cost * cost;
                        magnitude1 += cost * cost;
                        magnitude2 += cost * cost;
                    }
                    continue;
                }
                if let (Some(v1), Some(v2)) = (a.scalar(key), b.scalar(key)) {
                    product += v1 * v2;
                    magnitude1 += v1 * v1;
                    magnitude2 += v2 * v2;
                }
            }
            if magnitude1 == 0.0 || magnitude2 == 0.0 {
                return Ok(0.0);
            }
            Ok(1.0 - product / (magnitude1.sqrt() * magnitude2.sqrt()))
        }
    }
}

/// Effective scalar pair for one key, reducing the sequence key to its DTW
/// cost (always on one side, so the one-sided convention applies to it).
fn pair(
    a: &FeatureVector,
    b: &FeatureVector,
    key: FeatureKey,
    percent: f64,
) -> (Option<f64>, Option<f64>) {
    if key.is_sequence() {
        (sequence_cost(a, b, percent), None)
    } else {
        (a.scalar(key), b.scalar(key))
    }
}

/// DTW cost of the truncated sequences, if anything remains to compare.
///
/// A sequence present on one side only is aligned against the zero
/// singleton, which reduces the cost to the sum of its absolute values and
/// mirrors the one-sided convention of the scalar keys.
fn sequence_cost(a: &FeatureVector, b: &FeatureVector, percent: f64) -> Option<f64> {
    let key = FeatureKey::RadialLengthSequence;
    if !a.contains(key) && !b.contains(key) {
        return None;
    }

    let seq_a = truncate(a.sequence(key).unwrap_or(&[]), percent);
    let seq_b = truncate(b.sequence(key).unwrap_or(&[]), percent);
    match (seq_a.is_empty(), seq_b.is_empty()) {
        (true, true) => None,
        (false, true) => Some(dtw(seq_a, &[0.0])),
        (true, false) => Some(dtw(&[0.0], seq_b)),
        (false, false) => Some(dtw(seq_a, seq_b)),
    }
}

fn truncate(sequence: &[f64], percent: f64) -> &[f64] {
    let keep = (sequence.len() as f64 * percent / 100.0).round() as usize;
    &sequence[..keep.min(sequence.len())]
}

/// Dynamic time warping cost between two ordered sequences.
///
/// Standard O(n·m) recurrence with +∞ borders and `cost[0][0] = 0`; the
/// elementwise cost is the absolute difference. Two empty sequences align
/// for free; an empty sequence against a non-empty one has no alignment and
/// costs +∞.
pub fn dtw(a: &[f64], b: &[f64]) -> f64 {
    let (n, m) = (a.len(), b.len());
    if n == 0 && m == 0 {
        return 0.0;
    }
    if n == 0 || m == 0 {
        return f64::INFINITY;
    }

    let mut prev = vec![f64::INFINITY; m + 1];
    prev[0] = 0.0;
    let mut cur = vec![f64::INFINITY; m + 1];
    for i in 1..=n {
        cur[0] = f64::INFINITY;
        for j in 1..=m {
            let cost = (a[i - 1] - b[j - 1]).abs();
            cur[j] = cost + prev[j].min(cur[j - 1]).min(prev[j - 1]);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[m]
}
