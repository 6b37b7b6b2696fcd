//! Domain types used throughout the solver layer.
//!
//! This module defines:
//!
//! - sample sets and fit outputs (`Sample`, `FitResult`, `Diagnostic`)
//! - linear systems and solver outputs (`LinearSystem`, `DirectSolution`, `IterativeSolution`)
//! - file schemas for exports (`FitFile`, `SystemFile`)

pub mod types;

pub use types::*;
