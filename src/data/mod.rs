//! Input data: built-in demo datasets and synthetic generators.

pub mod presets;
pub mod sample;

pub use presets::*;
pub use sample::*;
