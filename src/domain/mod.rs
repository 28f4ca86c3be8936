//! Domain types used throughout the dashboards.
//!
//! This module defines:
//!
//! - input records and resampling outputs (`Observation`, `Bucket`, `ResampledSeries`)
//! - the resampling granularity (`Frequency`)
//! - the render-agnostic chart description (`Figure`)

pub mod types;

pub use types::*;
