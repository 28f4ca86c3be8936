//! Input/output helpers.
//!
//! - CSV ingest + schema validation (`ingest`)
//! - resampled series export (CSV) (`export`)
//! - figure JSON read/write (`figure`)

pub mod export;
pub mod figure;
pub mod ingest;

pub use export::*;
pub use figure::*;
pub use ingest::*;
