//! Exponential curve fitting by linearized least squares.
//!
//! Responsibilities:
//!
//! - validate the sample set (positive y, usable x spread)
//! - solve the two-parameter log-linear problem (centered or uncentered)
//! - de-linearize and return the fit with its intermediate sums

pub mod fitter;

pub use fitter::*;
