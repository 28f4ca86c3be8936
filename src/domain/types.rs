//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the dashboard callbacks
//! - exported to JSON/CSV
//! - reloaded later for plotting

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Calendar granularity used when resampling a rate series.
///
/// Buckets are right-closed and labelled by their last day:
/// weeks end on Sunday, months/quarters/years end on their final calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[value(alias = "w")]
    Weekly,
    #[value(alias = "m")]
    Monthly,
    #[value(alias = "q")]
    Quarterly,
    #[value(alias = "y")]
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Yearly,
    ];

    /// Short code used as the control value (`W`, `M`, `Q`, `Y`).
    pub fn code(self) -> &'static str {
        match self {
            Frequency::Weekly => "W",
            Frequency::Monthly => "M",
            Frequency::Quarterly => "Q",
            Frequency::Yearly => "Y",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Yearly => "Yearly",
        }
    }
}

/// One exchange-rate observation from the input files.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub target: String,
    pub rate: f64,
}

/// One calendar bucket of a resampled series.
///
/// `mean` is `None` for buckets inside the observed range that received no rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub mean: Option<f64>,
    pub count: usize,
}

/// Bucketed mean rates, ordered by bucket start.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledSeries {
    pub frequency: Frequency,
    pub buckets: Vec<Bucket>,
}

impl ResampledSeries {
    /// `(bucket label, mean)` for every non-empty bucket.
    pub fn points(&self) -> Vec<(NaiveDate, f64)> {
        self.buckets
            .iter()
            .filter_map(|b| b.mean.map(|m| (b.end, m)))
            .collect()
    }

    pub fn non_empty_len(&self) -> usize {
        self.buckets.iter().filter(|b| b.mean.is_some()).count()
    }
}

/// A labelled value on the chart (peak or low).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extreme {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremes {
    pub peak: Extreme,
    pub low: Extreme,
}

/// One point of the decorative live trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub step: usize,
    pub value: f64,
}

/// How x-values of a figure are interpreted when formatting ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XAxisKind {
    /// x is a day number (`NaiveDate::num_days_from_ce`).
    Date,
    /// x is a plain step index.
    Step,
}

impl XAxisKind {
    pub fn format(self, x: f64) -> String {
        match self {
            XAxisKind::Date => date_from_x(x)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| format!("{x:.0}")),
            XAxisKind::Step => format!("{x:.0}"),
        }
    }
}

/// A text label attached to a point on the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Render-agnostic chart description produced by the dashboard callbacks.
///
/// The line is stored as contiguous segments; a gap (empty bucket) splits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_kind: XAxisKind,
    pub segments: Vec<Vec<(f64, f64)>>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Figure {
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.segments.iter().flatten().copied()
    }

    /// `[min, max]` of x over all points, if there are any finite values.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        finite_range(self.points().map(|(x, _)| x))
    }

    /// `[min, max]` of y over all points and annotations.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        finite_range(
            self.points()
                .map(|(_, y)| y)
                .chain(self.annotations.iter().map(|a| a.y)),
        )
    }
}

/// Figure JSON file: the figure plus a tool tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureFile {
    pub tool: String,
    pub figure: Figure,
}

/// Convert a date to the x coordinate used by figures.
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

pub fn date_from_x(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// Explicit column names that override schema detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaOverrides {
    pub date_column: Option<String>,
    pub target_column: Option<String>,
    pub rate_column: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_codes_round_trip() {
        for f in Frequency::ALL {
            assert_eq!(Frequency::from_code(f.code()), Some(f));
        }
        assert_eq!(Frequency::from_code("q"), Some(Frequency::Quarterly));
        assert_eq!(Frequency::from_code("D"), None);
    }

    #[test]
    fn date_axis_formats_day_numbers() {
        let d = NaiveDate::from_ymd_opt(2023, 1, 8).unwrap();
        assert_eq!(XAxisKind::Date.format(date_to_x(d)), "2023-01-08");
        assert_eq!(XAxisKind::Step.format(3.0), "3");
    }

    #[test]
    fn figure_ranges_include_annotations() {
        let fig = Figure {
            title: "t".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            x_kind: XAxisKind::Step,
            segments: vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(3.0, 1.5)]],
            annotations: vec![Annotation { x: 1.0, y: 2.5, text: "a".to_string() }],
        };
        assert_eq!(fig.x_range(), Some((0.0, 3.0)));
        assert_eq!(fig.y_range(), Some((1.0, 2.5)));
    }
}
