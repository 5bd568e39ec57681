// Statistical convergence of the multiplicity fluctuation modes.

use fireball_mc::multiplicity::{sample_multiplicity, FluctuationMode};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Scenario B: Poisson mode at mean 5.0 over 100k draws converges to the
/// mean within +-0.05.
#[test]
fn test_poisson_mean_five_over_hundred_thousand_draws() {
    let mut rng = StdRng::seed_from_u64(701);
    let n = 100_000;
    let total: u64 = (0..n)
        .map(|_| sample_multiplicity(5.0, FluctuationMode::Poisson, &mut rng))
        .sum();
    let mean = total as f64 / n as f64;
    assert!((mean - 5.0).abs() < 0.05, "empirical mean = {mean}");
}

#[test]
fn test_large_mean_convergence_poisson_and_gaussian() {
    // mean 10000: standard deviation is 100, so the standard error over
    // 2000 draws is ~2.2; a tolerance of 10 is comfortably 4+ sigma
    let n = 2_000;
    for (mode, seed) in [
        (FluctuationMode::Poisson, 702u64),
        (FluctuationMode::Gaussian, 703u64),
    ] {
        let mut rng = StdRng::seed_from_u64(seed);
        let total: u64 = (0..n)
            .map(|_| sample_multiplicity(10_000.0, mode, &mut rng))
            .sum();
        let mean = total as f64 / n as f64;
        assert!(
            (mean - 10_000.0).abs() < 10.0,
            "{mode:?} empirical mean = {mean}"
        );
    }
}

#[test]
fn test_poisson_variance_matches_mean() {
    let mut rng = StdRng::seed_from_u64(704);
    let n = 50_000;
    let draws: Vec<f64> = (0..n)
        .map(|_| sample_multiplicity(8.0, FluctuationMode::Poisson, &mut rng) as f64)
        .collect();
    let mean = draws.iter().sum::<f64>() / n as f64;
    let var = draws.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1) as f64;
    assert!((mean - 8.0).abs() < 0.1, "mean = {mean}");
    assert!((var - 8.0).abs() < 0.3, "variance = {var}");
}

#[test]
fn test_zero_mean_never_fluctuates() {
    let mut rng = StdRng::seed_from_u64(705);
    for mode in [
        FluctuationMode::Poisson,
        FluctuationMode::Gaussian,
        FluctuationMode::Hybrid,
        FluctuationMode::NegativeBinomial,
    ] {
        for _ in 0..1_000 {
            assert_eq!(sample_multiplicity(0.0, mode, &mut rng), 0);
        }
    }
}
