//! Infinity norms used by the solvers.

use nalgebra::{DMatrix, DVector};

/// `max_i |v_i|`. Returns NaN if any entry is NaN.
pub fn vector_inf_norm(v: &[f64]) -> f64 {
    v.iter().fold(0.0_f64, |acc, &x| {
        if acc.is_nan() || x.is_nan() {
            f64::NAN
        } else {
            acc.max(x.abs())
        }
    })
}

/// `max_i |a_i - b_i|`: the Gauss-Seidel stopping quantity.
///
/// NaN propagates so that a diverged iterate never satisfies `delta < tol`.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).fold(0.0_f64, |acc, (&x, &y)| {
        let d = (x - y).abs();
        if acc.is_nan() || d.is_nan() {
            f64::NAN
        } else {
            acc.max(d)
        }
    })
}

/// Maximum absolute row sum `‖A‖∞`. Saturates to infinity when the true
/// norm exceeds `f64::MAX`; see [`scaled_matrix_inf_norm`].
pub fn matrix_inf_norm(a: &DMatrix<f64>) -> f64 {
    let (scale, ratio) = scaled_matrix_inf_norm(a);
    scale * ratio
}

/// `‖A‖∞` as `(scale, ratio)` with `‖A‖∞ = scale · ratio`.
///
/// `scale` is `max |a_ij|` and `ratio` lies in `[1, ncols]`, so both stay
/// finite for any finite matrix. A zero matrix gives `(0, 0)`.
pub fn scaled_matrix_inf_norm(a: &DMatrix<f64>) -> (f64, f64) {
    let scale = a.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 {
        return (0.0, 0.0);
    }
    let ratio = a
        .row_iter()
        .map(|row| row.iter().map(|v| v.abs() / scale).sum::<f64>())
        .fold(0.0, f64::max);
    (scale, ratio)
}

/// `‖A·x − b‖∞`.
pub fn residual_inf_norm(a: &DMatrix<f64>, x: &[f64], b: &DVector<f64>) -> f64 {
    let x = DVector::from_column_slice(x);
    let r = a * x - b;
    vector_inf_norm(r.as_slice())
}
