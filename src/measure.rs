//! Geometric diagnostics over a point set.
//!
//! None of these feed back into the relaxation; they exist for callers
//! comparing configurations before and after a run.

use nalgebra::Vector3;

/// Smallest Euclidean distance between any two distinct indices.
///
/// Returns `f64::INFINITY` for fewer than two points.
#[must_use]
pub fn min_distance(points: &[Vector3<f64>]) -> f64 {
    let mut min = f64::INFINITY;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            min = min.min((a - b).norm());
        }
    }
    min
}

/// All pairwise distances in condensed upper-triangle order: (0,1), (0,2), …, (1,2), …
#[must_use]
pub fn pairwise_distances(points: &[Vector3<f64>]) -> Vec<f64> {
    let n = points.len();
    let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for (i, a) in points.iter().enumerate() {
        out.extend(points[i + 1..].iter().map(|b| (a - b).norm()));
    }
    out
}

/// Riesz s-energy `Σ_{i<j} |x_i - x_j|^{-s}`. `s = 1` is the Coulomb energy.
///
/// Coincident pairs contribute infinity.
#[must_use]
pub fn riesz_energy(points: &[Vector3<f64>], s: f64) -> f64 {
    pairwise_distances(points)
        .into_iter()
        .map(|d| d.powf(-s))
        .sum()
}

/// Largest `| |x| - 1 |` over the set.
#[must_use]
pub fn max_norm_deviation(points: &[Vector3<f64>]) -> f64 {
    points
        .iter()
        .map(|p| (p.norm() - 1.0).abs())
        .fold(0.0, f64::max)
}
