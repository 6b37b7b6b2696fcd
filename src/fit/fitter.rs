//! Least-squares fit of `N = alpha · 10^(beta · x)`.
//!
//! Given samples `(x_i, y_i)` with `y_i > 0` we linearize
//!
//! ```text
//! log10(y) = beta · x + log10(alpha)
//! ```
//!
//! and solve the resulting straight-line least-squares problem. Two methods:
//!
//! - **Centered** (default): with `t = x − mean(x)` the normal equations
//!   decouple, giving `beta = Σ t·log10(y) / Σ t²` and an intercept equal to
//!   `mean(log10 y)` at `t = 0`. This avoids forming `Σ x²`, which loses most
//!   of its significant digits when x are calendar years.
//! - **Uncentered**: build the 2×2 normal equations in raw x and solve them
//!   with the pivoted direct solver.
//!
//! The two are algebraically identical; they differ only in rounding.

use crate::domain::{Diagnostic, FitMethod, FitResult, LinearSystem, Sample};
use crate::error::{Result, SolverError};
use crate::math::solve_direct;

/// Fit with the centered method.
pub fn fit(samples: &[Sample]) -> Result<FitResult> {
    fit_with(samples, FitMethod::Centered)
}

/// Fit with an explicit method.
pub fn fit_with(samples: &[Sample], method: FitMethod) -> Result<FitResult> {
    validate_samples(samples)?;

    let xs: Vec<f64> = samples.iter().map(|s| s.x).collect();
    let y_log: Vec<f64> = samples.iter().map(|s| s.y.log10()).collect();

    let n = xs.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / n;
    let sum_tt: f64 = xs.iter().map(|&x| (x - x_mean) * (x - x_mean)).sum();
    ensure_x_spread(&xs, sum_tt)?;

    let result = match method {
        FitMethod::Centered => fit_centered(&xs, &y_log, x_mean, sum_tt)?,
        FitMethod::Uncentered => fit_uncentered(&xs, &y_log)?,
    };

    log::debug!(
        "{} fit: n={}, beta={:.6e}, log10(alpha)={:.6}, r2={:.6}",
        method.display_name(),
        result.n,
        result.beta,
        result.log_alpha(),
        result.r_squared
    );
    Ok(result)
}

fn validate_samples(samples: &[Sample]) -> Result<()> {
    if samples.len() < 2 {
        return Err(SolverError::invalid(format!(
            "At least 2 samples are required, got {}.",
            samples.len()
        )));
    }
    for (i, s) in samples.iter().enumerate() {
        if !s.x.is_finite() {
            return Err(SolverError::invalid(format!(
                "Sample {}: x={} is not finite.",
                i + 1,
                s.x
            )));
        }
        if !(s.y.is_finite() && s.y > 0.0) {
            return Err(SolverError::invalid(format!(
                "Sample {}: y={} must be finite and > 0 for the log transform.",
                i + 1,
                s.y
            )));
        }
    }
    Ok(())
}

fn ensure_x_spread(xs: &[f64], sum_tt: f64) -> Result<()> {
    let first = xs[0];
    let scale = xs.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
    let floor = xs.len() as f64 * (4.0 * f64::EPSILON * scale).powi(2);
    if xs.iter().all(|&x| x == first) {
        return Err(SolverError::invalid(
            "All x values are identical; the slope is undefined.",
        ));
    }
    if !(sum_tt > floor) {
        return Err(SolverError::invalid(format!(
            "x spread is below rounding noise (sum of squared deviations {sum_tt:e}); the slope is undefined."
        )));
    }
    Ok(())
}

fn fit_centered(xs: &[f64], y_log: &[f64], x_mean: f64, sum_tt: f64) -> Result<FitResult> {
    let n = xs.len();
    let mut sum_t = 0.0;
    let mut sum_y = 0.0;
    let mut sum_ty = 0.0;
    for (&x, &y) in xs.iter().zip(y_log) {
        let t = x - x_mean;
        sum_t += t;
        sum_y += y;
        sum_ty += t * y;
    }

    let beta = sum_ty / sum_tt;
    let mean_y = sum_y / n as f64;
    let log_alpha = mean_y - beta * x_mean;
    let alpha = delinearize(log_alpha)?;

    let r_squared = r_squared(xs, y_log, |x| mean_y + beta * (x - x_mean));

    Ok(FitResult {
        alpha,
        beta,
        intercept: mean_y,
        centering_offset: x_mean,
        method: FitMethod::Centered,
        n,
        r_squared,
        diagnostics: vec![
            Diagnostic::new("n", n as f64),
            Diagnostic::new("x_mean", x_mean),
            Diagnostic::new("sum_t", sum_t),
            Diagnostic::new("sum_t2", sum_tt),
            Diagnostic::new("sum_log_y", sum_y),
            Diagnostic::new("sum_t_log_y", sum_ty),
            Diagnostic::new("mean_log_y", mean_y),
            Diagnostic::new("r_squared", r_squared),
        ],
    })
}

fn fit_uncentered(xs: &[f64], y_log: &[f64]) -> Result<FitResult> {
    let n = xs.len();
    let mut sum_x = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    for (&x, &y) in xs.iter().zip(y_log) {
        sum_x += x;
        sum_xx += x * x;
        sum_y += y;
        sum_xy += x * y;
    }

    // [ n    Σx  ] [c0  ]   [ Σy  ]
    // [ Σx   Σx² ] [beta] = [ Σxy ]
    let normal = LinearSystem::from_rows(
        &[vec![n as f64, sum_x], vec![sum_x, sum_xx]],
        &[sum_y, sum_xy],
    )?;
    let solution = solve_direct(&normal).map_err(|e| match e {
        SolverError::SingularMatrix { .. } => SolverError::invalid(
            "Normal equations are singular; the x values have no usable spread.",
        ),
        other => other,
    })?;

    let c0 = solution.x[0];
    let beta = solution.x[1];
    let alpha = delinearize(c0)?;
    let r_squared = r_squared(xs, y_log, |x| c0 + beta * x);

    Ok(FitResult {
        alpha,
        beta,
        intercept: c0,
        centering_offset: 0.0,
        method: FitMethod::Uncentered,
        n,
        r_squared,
        diagnostics: vec![
            Diagnostic::new("n", n as f64),
            Diagnostic::new("sum_x", sum_x),
            Diagnostic::new("sum_x2", sum_xx),
            Diagnostic::new("sum_log_y", sum_y),
            Diagnostic::new("sum_x_log_y", sum_xy),
            Diagnostic::new("det_normal", solution.determinant),
            Diagnostic::new("r_squared", r_squared),
        ],
    })
}

/// Recover `alpha = 10^log_alpha`, rejecting values `f64` cannot hold.
fn delinearize(log_alpha: f64) -> Result<f64> {
    let alpha = 10f64.powf(log_alpha);
    if alpha.is_finite() && alpha > 0.0 {
        Ok(alpha)
    } else {
        Err(SolverError::OverflowCondition(format!(
            "alpha = 10^{log_alpha:.3} is outside the f64 range"
        )))
    }
}

/// Coefficient of determination of the linearized fit.
fn r_squared(xs: &[f64], y_log: &[f64], line: impl Fn(f64) -> f64) -> f64 {
    let mean = y_log.iter().sum::<f64>() / y_log.len() as f64;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (&x, &y) in xs.iter().zip(y_log) {
        let r = y - line(x);
        ss_res += r * r;
        ss_tot += (y - mean) * (y - mean);
    }
    if ss_tot == 0.0 {
        // Constant y: the horizontal line is exact.
        1.0
    } else {
        1.0 - ss_res / ss_tot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::moore_samples;
    use approx::assert_relative_eq;

    fn exact_samples(alpha: f64, beta: f64, xs: &[f64]) -> Vec<Sample> {
        xs.iter()
            .map(|&x| Sample::new(x, alpha * 10f64.powf(beta * x)))
            .collect()
    }

    #[test]
    fn recovers_exact_exponential() {
        let samples = exact_samples(5.0, 0.1, &[0.0, 1.0, 2.0, 3.5, 7.0, 10.0]);
        for method in [FitMethod::Centered, FitMethod::Uncentered] {
            let fit = fit_with(&samples, method).unwrap();
            assert_relative_eq!(fit.alpha, 5.0, max_relative = 1e-10);
            assert_relative_eq!(fit.beta, 0.1, max_relative = 1e-10);
            assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
            for s in &samples {
                assert_relative_eq!(fit.predict(s.x).unwrap(), s.y, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn moore_dataset_matches_reference_fit() {
        let fit = fit(&moore_samples()).unwrap();
        assert_relative_eq!(fit.beta, 0.13718289795898433, max_relative = 1e-10);
        assert_relative_eq!(fit.log_alpha(), -266.95340127497724, max_relative = 1e-10);
        assert_relative_eq!(fit.predict(2010.0).unwrap(), 6.084482167e8, max_relative = 1e-6);
        assert_relative_eq!(fit.predict(2020.0).unwrap(), 1.4323613778e10, max_relative = 1e-6);
        assert_eq!(fit.centering_offset, fit.diagnostic("x_mean").unwrap());
    }

    #[test]
    fn centered_and_uncentered_agree_on_moore_data() {
        let samples = moore_samples();
        let c = fit_with(&samples, FitMethod::Centered).unwrap();
        let u = fit_with(&samples, FitMethod::Uncentered).unwrap();
        assert_relative_eq!(c.beta, u.beta, max_relative = 1e-7);
        assert_relative_eq!(c.log_alpha(), u.log_alpha(), max_relative = 1e-7);
        assert_eq!(u.centering_offset, 0.0);
        assert_eq!(u.intercept, u.log_alpha());
    }

    #[test]
    fn identical_x_is_invalid() {
        let samples = vec![
            Sample::new(0.1, 1.0),
            Sample::new(0.1, 2.0),
            Sample::new(0.1, 3.0),
        ];
        for method in [FitMethod::Centered, FitMethod::Uncentered] {
            assert!(matches!(
                fit_with(&samples, method),
                Err(SolverError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn x_spread_at_rounding_noise_is_invalid() {
        // Adjacent doubles: distinct, but their spread is pure rounding.
        let x0 = 1e10_f64;
        let x1 = f64::from_bits(x0.to_bits() + 1);
        assert_ne!(x0, x1);
        let samples = vec![Sample::new(x0, 1.0), Sample::new(x1, 10.0)];

        let err = fit(&samples).unwrap_err();
        match err {
            SolverError::InvalidInput(msg) => {
                assert!(msg.contains("rounding noise"), "{msg}");
                assert!(!msg.contains("identical"), "{msg}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn non_positive_y_is_invalid() {
        let samples = vec![Sample::new(0.0, 1.0), Sample::new(1.0, 0.0)];
        let err = fit(&samples).unwrap_err();
        assert!(err.to_string().contains("Sample 2"));

        let samples = vec![Sample::new(0.0, 1.0), Sample::new(1.0, -3.0)];
        assert!(fit(&samples).is_err());
    }

    #[test]
    fn too_few_samples_is_invalid() {
        assert!(fit(&[]).is_err());
        assert!(fit(&[Sample::new(1.0, 1.0)]).is_err());
    }

    #[test]
    fn duplicate_x_are_allowed() {
        let samples = vec![
            Sample::new(0.0, 1.0),
            Sample::new(0.0, 100.0),
            Sample::new(1.0, 10.0),
        ];
        let fit = fit(&samples).unwrap();
        assert!(fit.beta.is_finite());
        assert!(fit.r_squared < 1.0);
    }

    #[test]
    fn centered_diagnostics_are_consistent() {
        let samples = exact_samples(2.0, 0.5, &[1.0, 2.0, 3.0]);
        let fit = fit(&samples).unwrap();
        assert_eq!(fit.diagnostic("n"), Some(3.0));
        assert!(fit.diagnostic("sum_t").unwrap().abs() < 1e-12);
        assert_relative_eq!(fit.diagnostic("sum_t2").unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, fit.diagnostic("mean_log_y").unwrap());
    }

    #[test]
    fn unrepresentable_alpha_is_overflow() {
        // log10(alpha) ~ -1000: far below the smallest subnormal.
        let samples = vec![Sample::new(1000.0, 1.0), Sample::new(1001.0, 10.0)];
        assert!(matches!(
            fit(&samples),
            Err(SolverError::OverflowCondition(_))
        ));
    }
}
