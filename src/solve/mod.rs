//! Linear-system front door.
//!
//! - solver dispatch configured by `SolverOptions` (`dispatch`)
//! - tolerance sweeps for Gauss-Seidel (`study`)

pub mod dispatch;
pub mod study;

pub use dispatch::*;
pub use study::*;
