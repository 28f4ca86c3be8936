//! `fx-dashboards` library crate.
//!
//! The binary (`fxdash`) is a thin wrapper around this library so that:
//!
//! - core logic (ingest, resampling, extrema, trend) is testable without a terminal
//! - the dashboards share one pipeline with the line-oriented commands
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod resample;
pub mod tui;
