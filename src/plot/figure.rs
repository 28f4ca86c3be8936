//! Figure construction for both dashboards.
//!
//! Builders only describe the chart; rendering lives in `plot::ascii` and the
//! TUI chart widget.

use crate::domain::{
    Annotation, Extremes, Figure, ResampledSeries, TrendPoint, XAxisKind, date_to_x,
};

/// Line chart of a resampled series with peak/low annotations.
///
/// Empty buckets split the line into separate segments.
pub fn rates_figure(
    target: &str,
    series: &ResampledSeries,
    extremes: Option<&Extremes>,
    x_label: &str,
    y_label: &str,
) -> Figure {
    let mut segments: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current = Vec::new();
    for bucket in &series.buckets {
        match bucket.mean {
            Some(mean) => current.push((date_to_x(bucket.end), mean)),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    let annotations = extremes
        .map(|ext| {
            vec![
                Annotation {
                    x: date_to_x(ext.peak.date),
                    y: ext.peak.value,
                    text: format!("Peak: {}", ext.peak.date.format("%Y-%m-%d")),
                },
                Annotation {
                    x: date_to_x(ext.low.date),
                    y: ext.low.value,
                    text: format!("Low: {}", ext.low.date.format("%Y-%m-%d")),
                },
            ]
        })
        .unwrap_or_default();

    Figure {
        title: format!("{target} Exchange Rate Over Time"),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        x_kind: XAxisKind::Date,
        segments,
        annotations,
    }
}

/// Line chart of the synthetic live trend.
pub fn trend_figure(base: &str, target: &str, trend: &[TrendPoint]) -> Figure {
    let line: Vec<(f64, f64)> = trend.iter().map(|p| (p.step as f64, p.value)).collect();
    Figure {
        title: format!("{base} to {target} Exchange Rate Trend"),
        x_label: "step".to_string(),
        y_label: format!("rate ({target} per {base})"),
        x_kind: XAxisKind::Step,
        segments: if line.is_empty() { Vec::new() } else { vec![line] },
        annotations: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bucket, Extreme, Frequency};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn gaps_split_segments_and_extremes_are_annotated() {
        let series = ResampledSeries {
            frequency: Frequency::Monthly,
            buckets: vec![
                Bucket { start: d(2023, 1, 1), end: d(2023, 1, 31), mean: Some(1.0), count: 1 },
                Bucket { start: d(2023, 2, 1), end: d(2023, 2, 28), mean: None, count: 0 },
                Bucket { start: d(2023, 3, 1), end: d(2023, 3, 31), mean: Some(1.2), count: 2 },
            ],
        };
        let extremes = Extremes {
            peak: Extreme { date: d(2023, 3, 31), value: 1.2 },
            low: Extreme { date: d(2023, 1, 31), value: 1.0 },
        };

        let fig = rates_figure("EUR", &series, Some(&extremes), "Date", "Rate");
        assert_eq!(fig.title, "EUR Exchange Rate Over Time");
        assert_eq!(fig.segments.len(), 2);
        assert_eq!(fig.annotations[0].text, "Peak: 2023-03-31");
        assert_eq!(fig.annotations[0].x, date_to_x(d(2023, 3, 31)));
        assert_eq!(fig.annotations[1].text, "Low: 2023-01-31");
    }

    #[test]
    fn trend_figure_uses_steps() {
        let trend = crate::data::synthetic_trend(1.0);
        let fig = trend_figure("USD", "EUR", &trend);
        assert_eq!(fig.x_kind, XAxisKind::Step);
        assert_eq!(fig.segments[0].len(), 10);
        assert_eq!(fig.segments[0][3], (3.0, 1.0 * (1.0 + 0.05 * 3.0)));
        assert!(fig.annotations.is_empty());
    }
}
