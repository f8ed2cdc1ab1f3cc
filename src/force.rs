//! Per-point disequilibrium under an inverse-square repulsion.
//!
//! For point `i` the total force is `F = Σ_j G (x_i - x_j) / |x_i - x_j|³` over every
//! `j` whose difference vector is nonzero. The disequilibrium is the tangential part
//! of `F` divided by `|F|`, so its norm lies in `[0, 1]` and `G` cancels out.
//! Every function here is pure over a frozen snapshot and safe to call in parallel.

use nalgebra::Vector3;

/// Gravitational constant in m³ kg⁻¹ s⁻². Only its sign matters to the result.
const G: f64 = 6.674_08e-11;

/// Result of one sweep over the other points from the viewpoint of a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSample {
    /// Normalized tangential force at the point.
    pub disequilibrium: Vector3<f64>,
    /// Distance to the nearest other point (zero if some point coincides with it).
    pub nearest: f64,
}

/// Sum of pairwise forces acting on `points[i]`, together with the nearest distance.
fn total_force(points: &[Vector3<f64>], i: usize) -> (Vector3<f64>, f64) {
    let xi = points[i];
    let mut force = Vector3::zeros();
    let mut nearest = f64::INFINITY;
    for (j, xj) in points.iter().enumerate() {
        if j == i {
            continue;
        }
        let diff = xi - xj;
        let dist = diff.norm();
        nearest = nearest.min(dist);
        if diff == Vector3::zeros() {
            continue;
        }
        force += diff * (G / (dist * dist * dist));
    }
    (force, nearest)
}

/// Tangential part of `force` at `position`, scaled by `1 / |force|`.
///
/// `position` need not be unit length; the normal is taken as its direction.
#[must_use]
pub fn tangential_fraction(position: &Vector3<f64>, force: &Vector3<f64>) -> Vector3<f64> {
    let normal = position.normalize();
    let tangential = force - normal * force.dot(&normal);
    tangential / force.norm()
}

/// Disequilibrium vector of `points[i]`.
///
/// Undefined (non-finite) when the total force vanishes, e.g. for a single point.
///
/// # Panics
///
/// Panics if `i` is out of bounds.
#[must_use]
pub fn disequilibrium(points: &[Vector3<f64>], i: usize) -> Vector3<f64> {
    let (force, _) = total_force(points, i);
    tangential_fraction(&points[i], &force)
}

/// Disequilibrium and nearest-neighbour distance of `points[i]` from one pass.
///
/// The driver takes the minimum of `nearest` over all points as `d_min`, so the
/// O(N²) distance work is shared between the force and the step size.
#[must_use]
pub fn sample_point(points: &[Vector3<f64>], i: usize) -> PointSample {
    let (force, nearest) = total_force(points, i);
    PointSample {
        disequilibrium: tangential_fraction(&points[i], &force),
        nearest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn assert_close(actual: Vector3<f64>, expected: Vector3<f64>) {
        assert!(
            (actual - expected).norm() < EPS,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_square_on_great_circle_is_balanced() {
        let square: [Vector3<f64>; 4] = [Vector3::x(), Vector3::y(), -Vector3::x(), -Vector3::y()];
        for i in 0..square.len() {
            assert_close(disequilibrium(&square, i), Vector3::zeros());
        }
    }

    #[test]
    fn test_asymmetric_four_points_regression() {
        // Three points on the equator plus the north pole.
        let points: [Vector3<f64>; 4] = [Vector3::x(), Vector3::y(), -Vector3::x(), Vector3::z()];
        let a = 0.327_412_901_451_069_27;
        let b = 0.316_227_766_016_837_94;
        assert_close(disequilibrium(&points, 0), Vector3::new(0.0, -a, -a));
        assert_close(disequilibrium(&points, 1), Vector3::new(0.0, 0.0, -b));
        assert_close(disequilibrium(&points, 2), Vector3::new(0.0, -a, -a));
        assert_close(disequilibrium(&points, 3), Vector3::new(0.0, -b, 0.0));
    }

    #[test]
    fn test_magnitude_bounded_by_one() {
        let points = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0).normalize(),
            Vector3::new(0.6, 0.8, 0.0),
            Vector3::new(0.0, 0.6, 0.8),
            Vector3::new(-0.48, 0.6, 0.64),
        ];
        for i in 0..points.len() {
            let w = disequilibrium(&points, i);
            assert!(w.norm() <= 1.0 + EPS);
            // Tangential: no component along the point's own direction.
            assert!(w.dot(&points[i]).abs() < EPS);
        }
    }

    #[test]
    fn test_coincident_point_is_skipped() {
        let points: [Vector3<f64>; 3] = [Vector3::z(), Vector3::z(), -Vector3::z()];
        let sample = sample_point(&points, 0);
        assert_eq!(sample.nearest, 0.0);
        assert!(sample.disequilibrium.iter().all(|c| c.is_finite()));
        assert_close(sample.disequilibrium, Vector3::zeros());
    }

    #[test]
    fn test_single_point_is_undefined() {
        let w = disequilibrium(&[Vector3::<f64>::x()], 0);
        assert!(w.iter().any(|c| !c.is_finite()));
    }

    #[test]
    fn test_sample_matches_separate_passes() {
        let points = [
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.6, 0.0, 0.8),
            Vector3::new(0.0, -1.0, 0.0),
        ];
        let sample = sample_point(&points, 1);
        assert_close(sample.disequilibrium, disequilibrium(&points, 1));
        assert!((sample.nearest - (points[0] - points[1]).norm()).abs() < EPS);
    }
}
