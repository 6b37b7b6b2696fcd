//! Exponential model evaluation.
//!
//! The model is implemented as small, pure functions so that the fitter, the
//! report and the exports all evaluate it the same way.

pub mod model;

pub use model::*;
