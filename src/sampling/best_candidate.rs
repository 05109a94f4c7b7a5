//! Blue-noise viewpoint sampling via best-candidate (Mitchell's) selection.
use glam::DVec2;
use rand::RngCore;
use tracing::warn;

use crate::error::{Error, Result};
use crate::map::MapConfig;
use crate::obstacle::Obstacle;
use crate::sampling::{rand01, SampleDomain};

/// Rejection-sampling attempts per drawn point.
pub const REJECTION_ATTEMPTS: usize = 1000;
/// Candidates drawn per best-candidate iteration.
pub const CANDIDATE_POOL: usize = 10;

/// Generate up to `target_count` viewpoints with approximately maximal
/// minimum pairwise spacing.
///
/// The first `target_count / 2` points are plain rejection samples inside
/// the navigable disc (polar draw, radius `√U·R` for uniform area density).
/// The rest grow one at a time: each iteration draws a pool of
/// [`CANDIDATE_POOL`] valid candidates and keeps the one farthest from its
/// nearest accepted point. Every draw has a budget of
/// [`REJECTION_ATTEMPTS`]; when a draw exhausts it the sampler stops early
/// and returns the short set, which callers must tolerate. An empty result
/// is an [`Error::SamplingExhausted`].
pub fn random_grid(
    map: &MapConfig,
    obstacles: &[Obstacle],
    target_count: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<DVec2>> {
    map.validate()?;
    if target_count == 0 {
        return Ok(Vec::new());
    }

    let domain = SampleDomain::new(map, obstacles);
    let mut points: Vec<DVec2> = Vec::with_capacity(target_count);

    let seed_count = target_count / 2;
    while points.len() < seed_count {
        match draw_valid(map, &domain, rng) {
            Some(p) => points.push(p),
            None => break,
        }
    }

    'grow: while points.len() < target_count {
        if points.is_empty() {
            match draw_valid(map, &domain, rng) {
                Some(p) => points.push(p),
                None => break,
            }
            continue;
        }

        let mut best: Option<DVec2> = None;
        let mut best_min = f64::NEG_INFINITY;
        for _ in 0..CANDIDATE_POOL {
            let Some(candidate) = draw_valid(map, &domain, rng) else {
                break 'grow;
            };
            let min_d = points
                .iter()
                .map(|q| q.distance(candidate))
                .fold(f64::INFINITY, f64::min);
            if min_d > best_min {
                best_min = min_d;
                best = Some(candidate);
            }
        }
        match best {
            Some(p) => points.push(p),
            None => break,
        }
    }

    if points.is_empty() {
        warn!(
            requested = target_count,
            "random grid placed no viewpoints"
        );
        return Err(Error::SamplingExhausted {
            requested: target_count,
            placed: 0,
        });
    }
    if points.len() < target_count {
        warn!(
            requested = target_count,
            placed = points.len(),
            "random grid returned a short viewpoint set"
        );
    }
    Ok(points)
}

/// One rejection-sampled viewpoint inside the navigable disc, or `None`
/// when the attempt budget runs out.
fn draw_valid(map: &MapConfig, domain: &SampleDomain<'_>, rng: &mut dyn RngCore) -> Option<DVec2> {
    for _ in 0..REJECTION_ATTEMPTS {
        let angle = rand01(rng) * std::f64::consts::TAU;
        let radius = rand01(rng).sqrt() * map.radius;
        let p = map.center + radius * DVec2::new(angle.cos(), angle.sin());
        if domain.accepts(p) {
            return Some(p);
        }
    }
    None
}
