//! Reporting utilities: formatted terminal output for the CLI commands.

pub mod format;

pub use format::*;
