//! Synthetic trend generation from a live rate.
//!
//! The live dashboard has no history to chart, so it fabricates a short
//! illustrative series from the current rate. These values are decorative and
//! carry no market information.

use crate::domain::TrendPoint;

/// Number of points in the synthetic trend.
pub const TREND_STEPS: usize = 10;

/// Relative increment applied per step.
pub const TREND_GROWTH: f64 = 0.05;

/// Step `i` is `rate * (1 + 0.05 * i)` for `i` in `0..10`.
pub fn synthetic_trend(rate: f64) -> Vec<TrendPoint> {
    (0..TREND_STEPS)
        .map(|step| TrendPoint {
            step,
            value: rate * (1.0 + TREND_GROWTH * step as f64),
        })
        .collect()
}
