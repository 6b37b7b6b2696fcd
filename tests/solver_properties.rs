//! Property tests for the public solver surface.

use approx::assert_relative_eq;
use proptest::prelude::*;

use moore_solve::data::random_dominant_system;
use moore_solve::math::residual_inf_norm;
use moore_solve::{
    FitMethod, IterativeParams, Sample, SolverError, fit, fit_with, predict, solve_direct,
    solve_iterative,
};

fn exact_samples(alpha: f64, beta: f64, x0: f64, step: f64, n: usize) -> Vec<Sample> {
    (0..n)
        .map(|i| {
            let x = x0 + step * i as f64;
            Sample::new(x, alpha * 10f64.powf(beta * x))
        })
        .collect()
}

proptest! {
    #[test]
    fn fit_recovers_exact_exponentials(
        alpha in 0.1f64..100.0,
        beta in -0.5f64..0.5,
        x0 in -50.0f64..50.0,
        step in 0.1f64..2.0,
        n in 3usize..20,
    ) {
        let samples = exact_samples(alpha, beta, x0, step, n);
        let result = fit(&samples).unwrap();

        assert_relative_eq!(result.beta, beta, epsilon = 1e-9);
        assert_relative_eq!(result.alpha, alpha, max_relative = 1e-7);

        let last = samples[n - 1];
        let y = predict(last.x, result.alpha, result.beta).unwrap();
        assert_relative_eq!(y, last.y, max_relative = 1e-7);
    }

    #[test]
    fn centered_and_uncentered_fits_agree(
        alpha in 0.5f64..20.0,
        beta in -0.3f64..0.3,
        x0 in -10.0f64..10.0,
        step in 0.5f64..2.0,
        n in 3usize..15,
        wobble in proptest::collection::vec(-0.05f64..0.05, 15),
    ) {
        let samples: Vec<Sample> = exact_samples(alpha, beta, x0, step, n)
            .into_iter()
            .zip(&wobble)
            .map(|(s, w)| Sample::new(s.x, s.y * 10f64.powf(*w)))
            .collect();

        let centered = fit_with(&samples, FitMethod::Centered).unwrap();
        let uncentered = fit_with(&samples, FitMethod::Uncentered).unwrap();

        assert_relative_eq!(centered.beta, uncentered.beta, epsilon = 1e-9);
        assert_relative_eq!(centered.log_alpha(), uncentered.log_alpha(), epsilon = 1e-8);
    }

    #[test]
    fn predict_reports_overflow_instead_of_infinity(
        log_alpha in -5.0f64..5.0,
        beta in 1.0f64..10.0,
    ) {
        let x = 400.0 / beta;
        let err = predict(x, 10f64.powf(log_alpha), beta).unwrap_err();
        prop_assert!(matches!(err, SolverError::OverflowCondition(_)));
    }

    #[test]
    fn gauss_seidel_matches_direct_on_dominant_systems(n in 1usize..9, seed in any::<u64>()) {
        let system = random_dominant_system(n, seed).unwrap();
        let direct = solve_direct(&system).unwrap();
        let params = IterativeParams {
            tolerance: 1e-12,
            max_iterations: 10_000,
            x0: None,
        };
        let iterative = solve_iterative(&system, &params).unwrap();

        prop_assert!(iterative.converged);
        for (g, d) in iterative.x.iter().zip(&direct.x) {
            assert_relative_eq!(*g, *d, epsilon = 1e-8, max_relative = 1e-8);
        }
    }

    #[test]
    fn direct_solution_has_small_residual(n in 1usize..11, seed in any::<u64>()) {
        let system = random_dominant_system(n, seed).unwrap();
        let solution = solve_direct(&system).unwrap();
        let r = residual_inf_norm(system.a(), &solution.x, system.b());
        prop_assert!(r < 1e-9, "residual {r:e}");
    }

    #[test]
    fn iteration_report_is_consistent(
        n in 1usize..6,
        seed in any::<u64>(),
        tolerance in 1e-12f64..1.0,
        max_iterations in 1usize..30,
    ) {
        let system = random_dominant_system(n, seed).unwrap();
        let params = IterativeParams { tolerance, max_iterations, x0: None };
        let s = solve_iterative(&system, &params).unwrap();

        prop_assert!(s.iterations_used >= 1 && s.iterations_used <= max_iterations);
        prop_assert_eq!(s.deltas.len(), s.iterations_used);
        if s.converged {
            prop_assert!(s.final_delta < tolerance);
        } else {
            prop_assert_eq!(s.iterations_used, max_iterations);
            prop_assert!(s.final_delta >= tolerance);
        }
    }
}
