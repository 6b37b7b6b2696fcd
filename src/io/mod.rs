//! Input/output helpers.
//!
//! - CSV sample ingest + validation (`ingest`)
//! - linear systems and solutions as JSON (`system`)
//! - fit JSON read/write (`fitfile`)
//! - prediction exports (`export`)

pub mod export;
pub mod fitfile;
pub mod ingest;
pub mod system;

pub use export::*;
pub use fitfile::*;
pub use ingest::*;
pub use system::*;
