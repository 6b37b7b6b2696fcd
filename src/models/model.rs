//! Evaluation of `N(x) = alpha · 10^(beta · x)`.
//!
//! The value is computed as `10^(log10(alpha) + beta·x)`. With calendar-year
//! inputs `alpha` is tiny (around 1e-267 for Moore's law) while `10^(beta·x)`
//! is huge, so multiplying the two factors can overflow even though the
//! product is representable.

use crate::error::{Result, SolverError};

/// Largest `log10` value that still fits in an `f64`.
const LOG10_MAX: f64 = 308.254_715_559_916_7;

/// Predict `alpha · 10^(beta · x)`.
///
/// Extrapolation far outside the fitted range is allowed; interpreting it is
/// the caller's business. A result too large for `f64` is reported as
/// `OverflowCondition` instead of returning infinity.
pub fn predict(x: f64, alpha: f64, beta: f64) -> Result<f64> {
    if !(x.is_finite() && beta.is_finite()) {
        return Err(SolverError::invalid(format!(
            "Prediction inputs must be finite (x={x}, beta={beta})."
        )));
    }
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(SolverError::invalid(format!(
            "alpha must be finite and > 0, got {alpha}."
        )));
    }

    let exponent = alpha.log10() + beta * x;
    if exponent == f64::NEG_INFINITY {
        return Ok(0.0);
    }
    if !exponent.is_finite() || exponent > LOG10_MAX {
        return Err(SolverError::OverflowCondition(format!(
            "alpha * 10^(beta * x) at x={x} is about 10^{exponent:.1}, beyond f64 range"
        )));
    }

    let value = 10f64.powf(exponent);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SolverError::OverflowCondition(format!(
            "alpha * 10^(beta * x) at x={x} is not representable"
        )))
    }
}

/// Predict at several points; stops at the first failure.
pub fn predict_many(xs: &[f64], alpha: f64, beta: f64) -> Result<Vec<f64>> {
    xs.iter().map(|&x| predict(x, alpha, beta)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_matches_closed_form() {
        let y = predict(3.0, 5.0, 0.1).unwrap();
        assert!((y - 5.0 * 10f64.powf(0.3)).abs() < 1e-12);
        assert!((predict(0.0, 2.5, 7.0).unwrap() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn tiny_alpha_large_x_does_not_overflow_spuriously() {
        // 10^(0.137 * 2010) alone is ~1e275; the product is ~6e8.
        let alpha = 1.113265434617192e-267;
        let beta = 0.13718289795898433;
        let y = predict(2010.0, alpha, beta).unwrap();
        assert!((y / 6.084482167e8 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn overflow_is_reported() {
        let err = predict(1e6, 5.0, 0.1).unwrap_err();
        assert!(matches!(err, SolverError::OverflowCondition(_)));
    }

    #[test]
    fn underflow_returns_zero() {
        assert_eq!(predict(-1e6, 5.0, 0.1).unwrap(), 0.0);
        // beta * x is -inf here; still an underflow, not an overflow.
        assert_eq!(predict(-1e308, 5.0, 10.0).unwrap(), 0.0);
        assert!(matches!(
            predict(1e308, 5.0, 10.0),
            Err(SolverError::OverflowCondition(_))
        ));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(matches!(predict(1.0, 0.0, 1.0), Err(SolverError::InvalidInput(_))));
        assert!(matches!(predict(1.0, -2.0, 1.0), Err(SolverError::InvalidInput(_))));
        assert!(matches!(predict(f64::NAN, 1.0, 1.0), Err(SolverError::InvalidInput(_))));
        assert!(matches!(predict(1.0, 1.0, f64::INFINITY), Err(SolverError::InvalidInput(_))));
    }

    #[test]
    fn predict_many_propagates_failure() {
        assert_eq!(predict_many(&[0.0, 1.0], 1.0, 1.0).unwrap(), vec![1.0, 10.0]);
        assert!(predict_many(&[0.0, 1e9], 1.0, 1.0).is_err());
    }
}
