use nalgebra::Vector3;
use rand::Rng;

/// Draw one point uniformly from the surface of a sphere of the given radius.
///
/// Uniform `z` in `[-1, 1)` with uniform azimuth is area-preserving (Archimedes).
#[must_use]
pub fn random_point_on_sphere<R: Rng + ?Sized>(radius: f64, rng: &mut R) -> Vector3<f64> {
    let z: f64 = rng.random_range(-1.0..1.0);
    let theta: f64 = rng.random_range(0.0..std::f64::consts::TAU);
    let r = z.mul_add(-z, 1.0).sqrt();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vector3::new(r * cos_theta, r * sin_theta, z) * radius
}

#[must_use]
pub fn random_points_on_sphere<R: Rng + ?Sized>(
    n: usize,
    radius: f64,
    rng: &mut R,
) -> Vec<Vector3<f64>> {
    (0..n).map(|_| random_point_on_sphere(radius, rng)).collect()
}

/// Points on the unit sphere, the only geometry the relaxation engine accepts.
#[must_use]
pub fn random_unit_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Vector3<f64>> {
    random_points_on_sphere(n, 1.0, rng)
}
