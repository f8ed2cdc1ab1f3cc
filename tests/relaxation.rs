use fekete::measure::{max_norm_deviation, min_distance, pairwise_distances, riesz_energy};
use fekete::{RelaxConfig, Silent, Status, random_unit_points, relax, relax_with};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn assert_relaxes(n: usize, iterations: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let initial = random_unit_points(n, &mut rng);
    let config = RelaxConfig {
        max_iterations: iterations,
        tolerance: 1e-20,
        window: 100,
        ..RelaxConfig::default()
    };

    let outcome = relax_with(config, Some(initial.clone()), &mut rng, &mut Silent).unwrap();

    assert!(matches!(
        outcome.status,
        Status::Converged | Status::BudgetExhausted
    ));
    assert!(max_norm_deviation(&outcome.points) < 1e-9);

    let errors = outcome.history.recorded();
    assert_eq!(errors.len(), outcome.iterations);
    let early = mean(&errors[..100]);
    let late = mean(&errors[errors.len() - 100..]);
    assert!(late < early / 10.0, "error did not decay: {early} -> {late}");

    assert!(riesz_energy(&outcome.points, 1.0) < riesz_energy(&initial, 1.0));
    assert!(min_distance(&outcome.points) > min_distance(&initial));
}

#[test]
fn thirty_points_relax() {
    assert_relaxes(30, 600, 1);
}

#[test]
fn hundred_points_relax() {
    assert_relaxes(100, 300, 7);
}

#[test]
#[ignore = "runs 10_000 iterations over 100 points"]
fn hundred_points_full_budget() {
    assert_relaxes(100, 10_000, 2021);
}

#[test]
fn rerun_from_relaxed_configuration_starts_near_equilibrium() {
    let config = RelaxConfig {
        max_iterations: 600,
        ..RelaxConfig::default()
    };
    let initial = random_unit_points(30, &mut StdRng::seed_from_u64(3));
    let first = relax(config.clone(), Some(initial)).unwrap();
    let second = relax(config, Some(first.points)).unwrap();

    let first_err = first.history.recorded()[0];
    let second_err = second.history.recorded()[0];
    assert!(
        second_err < first_err / 100.0,
        "restart error {second_err} vs initial {first_err}"
    );
}

#[test]
fn two_points_end_antipodal() {
    let config = RelaxConfig {
        max_iterations: 2000,
        ..RelaxConfig::default()
    };
    for seed in [1, 2, 3] {
        let initial = random_unit_points(2, &mut StdRng::seed_from_u64(seed));
        let outcome = relax(config.clone(), Some(initial)).unwrap();
        let d = (outcome.points[0] - outcome.points[1]).norm();
        assert!((d - 2.0).abs() < 1e-3, "seed {seed}: distance {d}");
    }
}

#[test]
fn four_points_form_regular_tetrahedron() {
    let config = RelaxConfig {
        max_iterations: 1000,
        ..RelaxConfig::default()
    };
    let edge = (8.0f64 / 3.0).sqrt();
    for seed in [1, 5, 9] {
        let initial = random_unit_points(4, &mut StdRng::seed_from_u64(seed));
        let outcome = relax(config.clone(), Some(initial)).unwrap();
        for d in pairwise_distances(&outcome.points) {
            assert!((d - edge).abs() < 1e-6, "seed {seed}: edge {d}");
        }
    }
}

#[test]
fn config_from_json_drives_sampling() {
    let config = RelaxConfig::from_json(r#"{"points": 8, "max_iterations": 5}"#).unwrap();
    let outcome = relax(config, None).unwrap();
    assert_eq!(outcome.points.len(), 8);
    assert_eq!(outcome.iterations, 5);
    assert_eq!(outcome.status, Status::BudgetExhausted);
}
