//! Shared view pipelines used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! - rates: filter target -> resample -> extremes -> figure + message
//! - live: validate codes -> fetch rate -> synthetic trend -> figure + message
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::{RateProvider, currency_name, synthetic_trend, validate_code};
use crate::domain::{Extremes, Figure, Frequency, ResampledSeries, TrendPoint};
use crate::error::AppError;
use crate::io::ingest::Dataset;
use crate::resample::{find_extremes, resample_mean, select_target};

/// All computed outputs of one rates-dashboard update.
#[derive(Debug, Clone)]
pub struct RatesView {
    pub target: String,
    pub series: ResampledSeries,
    pub extremes: Extremes,
    pub figure: Figure,
    pub message: String,
}

/// All computed outputs of one live-dashboard update.
#[derive(Debug, Clone)]
pub struct LiveView {
    pub base: &'static str,
    pub target: &'static str,
    pub rate: f64,
    pub trend: Vec<TrendPoint>,
    pub figure: Figure,
    pub message: String,
}

/// Recompute the rates view for one target and frequency.
pub fn rates_view(dataset: &Dataset, target: &str, frequency: Frequency) -> Result<RatesView, AppError> {
    let points = select_target(&dataset.observations, target);
    if points.is_empty() {
        return Err(AppError::new(3, format!("No observations for target '{target}'.")));
    }

    let series = resample_mean(&points, frequency);
    let extremes = find_extremes(&series)
        .ok_or_else(|| AppError::new(3, format!("No usable rates for target '{target}'.")))?;

    let figure = crate::plot::rates_figure(
        target,
        &series,
        Some(&extremes),
        &dataset.schema.date.name,
        &dataset.schema.rate.name,
    );
    let message = format!(
        "Highest rate on {}, Lowest rate on {}",
        extremes.peak.date.format("%Y-%m-%d"),
        extremes.low.date.format("%Y-%m-%d")
    );

    Ok(RatesView {
        target: target.to_string(),
        series,
        extremes,
        figure,
        message,
    })
}

/// Fetch the live rate and rebuild the synthetic trend view.
pub fn live_view(provider: &dyn RateProvider, base: &str, target: &str) -> Result<LiveView, AppError> {
    let base = validate_code(base)?;
    let target = validate_code(target)?;

    let rate = provider.get_rate(base, target)?;
    let trend = synthetic_trend(rate);
    let figure = crate::plot::trend_figure(base, target, &trend);

    let message = format!(
        "1 {base} ({}) = {rate:.4} {target} ({})",
        currency_name(base).unwrap_or(base),
        currency_name(target).unwrap_or(target),
    );

    Ok(LiveView {
        base,
        target,
        rate,
        trend,
        figure,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SchemaOverrides;
    use crate::io::ingest::read_observations;
    use chrono::NaiveDate;

    struct FixedRate(f64);

    impl RateProvider for FixedRate {
        fn get_rate(&self, _base: &str, _target: &str) -> Result<f64, AppError> {
            Ok(self.0)
        }
    }

    struct Unavailable;

    impl RateProvider for Unavailable {
        fn get_rate(&self, _base: &str, _target: &str) -> Result<f64, AppError> {
            Err(AppError::new(4, "provider down"))
        }
    }

    fn dataset(csv: &str) -> Dataset {
        let data = read_observations(csv.as_bytes(), "t.csv", &SchemaOverrides::default()).unwrap();
        Dataset::combine(vec![data]).unwrap()
    }

    #[test]
    fn weekly_example_view() {
        let ds = dataset("Date,TargetCurrency,ExchangeRate\n2023-01-01,EUR,1.0\n2023-01-08,EUR,1.1\n2023-01-04,GBP,0.8\n");
        let view = rates_view(&ds, "EUR", Frequency::Weekly).unwrap();

        let means: Vec<Option<f64>> = view.series.buckets.iter().map(|b| b.mean).collect();
        assert_eq!(means, vec![Some(1.0), Some(1.1)]);
        assert_eq!(view.extremes.peak.date, NaiveDate::from_ymd_opt(2023, 1, 8).unwrap());
        assert_eq!(view.message, "Highest rate on 2023-01-08, Lowest rate on 2023-01-01");
        assert_eq!(view.figure.x_label, "Date");
        assert_eq!(view.figure.y_label, "ExchangeRate");
        assert_eq!(view.figure.annotations.len(), 2);
    }

    #[test]
    fn unknown_target_is_a_data_error() {
        let ds = dataset("Date,TargetCurrency,ExchangeRate\n2023-01-01,EUR,1.0\n");
        let err = rates_view(&ds, "CHF", Frequency::Monthly).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn live_view_builds_trend_and_message() {
        let view = live_view(&FixedRate(0.92), "usd", "eur").unwrap();
        assert_eq!(view.base, "USD");
        assert_eq!(view.target, "EUR");
        assert_eq!(view.trend.len(), 10);
        assert_eq!(view.trend[4].value, 0.92 * (1.0 + 0.05 * 4.0));
        assert_eq!(view.message, "1 USD (US Dollar) = 0.9200 EUR (Euro)");
        assert_eq!(view.figure.title, "USD to EUR Exchange Rate Trend");
    }

    #[test]
    fn live_view_propagates_failures() {
        assert_eq!(live_view(&FixedRate(1.0), "USD", "ABC").unwrap_err().exit_code(), 2);
        assert_eq!(live_view(&Unavailable, "USD", "EUR").unwrap_err().exit_code(), 4);
    }
}
