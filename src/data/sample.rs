//! Synthetic inputs: noisy exponential sample sets and random linear systems.
//!
//! Generation is deterministic: the RNG seed is derived from the full
//! configuration, so the same flags always produce the same data.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use nalgebra::{DMatrix, DVector};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{LinearSystem, Sample};
use crate::error::{Result, SolverError};

/// Parameters for `generate_exponential`.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticConfig {
    pub alpha: f64,
    pub beta: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub count: usize,
    /// Standard deviation of the Gaussian noise added to `log10(y)`.
    pub noise_log10: f64,
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            alpha: 5.0,
            beta: 0.1,
            x_min: 0.0,
            x_max: 20.0,
            count: 20,
            noise_log10: 0.05,
            seed: 42,
        }
    }
}

/// Draw `count` samples of `alpha · 10^(beta·x + noise)`, sorted by x.
pub fn generate_exponential(config: &SyntheticConfig) -> Result<Vec<Sample>> {
    if config.count == 0 {
        return Err(SolverError::invalid("Sample count must be > 0."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(SolverError::invalid("Invalid x range for sample generation."));
    }
    if !(config.alpha.is_finite() && config.alpha > 0.0 && config.beta.is_finite()) {
        return Err(SolverError::invalid("alpha must be > 0 and beta finite."));
    }
    if !(config.noise_log10.is_finite() && config.noise_log10 >= 0.0) {
        return Err(SolverError::invalid("Noise level must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(sample_seed(config));
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| SolverError::invalid(format!("Noise distribution error: {e}")))?;

    let log_alpha = config.alpha.log10();
    let mut samples = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let x = rng.gen_range(config.x_min..=config.x_max);
        let z: f64 = normal.sample(&mut rng);
        let y = 10f64.powf(log_alpha + config.beta * x + config.noise_log10 * z);
        if !(y.is_finite() && y > 0.0) {
            return Err(SolverError::OverflowCondition(format!(
                "Synthetic value at x={x:.3} is outside the f64 range."
            )));
        }
        samples.push(Sample::new(x, y));
    }

    samples.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    Ok(samples)
}

/// Random `n×n` system whose rows are strictly diagonally dominant, so
/// Gauss-Seidel is guaranteed to converge on it.
pub fn random_dominant_system(n: usize, seed: u64) -> Result<LinearSystem> {
    if n == 0 {
        return Err(SolverError::invalid("System size must be >= 1."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut a = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        let mut off_diag = 0.0;
        for j in 0..n {
            if i != j {
                let v = rng.gen_range(-1.0..=1.0);
                a[(i, j)] = v;
                off_diag += f64::abs(v);
            }
        }
        let margin: f64 = rng.gen_range(0.5..1.5);
        let sign = if rng.r#gen::<bool>() { 1.0 } else { -1.0 };
        a[(i, i)] = sign * (off_diag + margin);
    }
    let b = DVector::from_fn(n, |_, _| rng.gen_range(-10.0..=10.0));

    LinearSystem::new(a, b)
}

fn sample_seed(config: &SyntheticConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.seed.hash(&mut hasher);
    config.count.hash(&mut hasher);
    config.alpha.to_bits().hash(&mut hasher);
    config.beta.to_bits().hash(&mut hasher);
    config.x_min.to_bits().hash(&mut hasher);
    config.x_max.to_bits().hash(&mut hasher);
    config.noise_log10.to_bits().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let config = SyntheticConfig::default();
        let a = generate_exponential(&config).unwrap();
        let b = generate_exponential(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), config.count);
        assert!(a.iter().all(|s| s.y > 0.0 && s.x >= 0.0 && s.x <= 20.0));
        assert!(a.windows(2).all(|w| w[0].x <= w[1].x));
    }

    #[test]
    fn noiseless_samples_lie_on_the_curve() {
        let config = SyntheticConfig {
            noise_log10: 0.0,
            ..SyntheticConfig::default()
        };
        for s in generate_exponential(&config).unwrap() {
            let expected = 5.0 * 10f64.powf(0.1 * s.x);
            assert!((s.y / expected - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let bad = [
            SyntheticConfig {
                count: 0,
                ..SyntheticConfig::default()
            },
            SyntheticConfig {
                x_min: 5.0,
                x_max: 5.0,
                ..SyntheticConfig::default()
            },
            SyntheticConfig {
                alpha: -1.0,
                ..SyntheticConfig::default()
            },
            SyntheticConfig {
                noise_log10: -0.1,
                ..SyntheticConfig::default()
            },
        ];
        for config in &bad {
            assert!(generate_exponential(config).is_err());
        }
    }

    #[test]
    fn random_system_is_diagonally_dominant() {
        let sys = random_dominant_system(6, 7).unwrap();
        let a = sys.a();
        for i in 0..6 {
            let off: f64 = (0..6).filter(|&j| j != i).map(|j| a[(i, j)].abs()).sum();
            assert!(a[(i, i)].abs() > off);
        }
        assert_eq!(random_dominant_system(6, 7).unwrap(), sys);
        assert!(random_dominant_system(0, 1).is_err());
    }
}
