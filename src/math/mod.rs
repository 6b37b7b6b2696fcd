//! Linear algebra: direct and iterative solvers plus the norms they share.

pub mod elimination;
pub mod gauss_seidel;
pub mod norms;

pub use elimination::*;
pub use gauss_seidel::*;
pub use norms::*;
