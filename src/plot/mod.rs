//! Chart construction and terminal rendering.

pub mod ascii;
pub mod figure;

pub use ascii::render_ascii_plot;
pub use figure::{rates_figure, trend_figure};
