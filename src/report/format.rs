//! Formatted terminal output for the non-interactive commands.
//!
//! We keep formatting code in one place so output changes are localized.

use crate::app::pipeline::{LiveView, RatesView};
use crate::data::CURRENCIES;
use crate::io::ingest::Dataset;

/// Dataset overview: files, schema, row counts, targets.
pub fn format_dataset_summary(dataset: &Dataset) -> String {
    let mut out = String::new();

    out.push_str("=== fxdash - Currency Exchange Rate Analysis ===\n");
    out.push_str(&format!("Schema: {}\n", dataset.schema.describe()));
    for f in &dataset.files {
        out.push_str(&format!(
            "File: {} | rows={} used={}\n",
            f.file, f.rows_read, f.rows_used
        ));
    }
    if let Some((from, to)) = dataset.date_range() {
        out.push_str(&format!("Dates: {from} .. {to}\n"));
    }
    out.push_str(&format!(
        "Observations: n={} of {} row(s) | skipped={}\n",
        dataset.observations.len(),
        dataset.rows_read(),
        dataset.row_errors.len()
    ));
    out.push_str(&format!("Targets: {}\n", dataset.targets().join(", ")));
    for err in dataset.row_errors.iter().take(5) {
        out.push_str(&format!("  ({}:{}) {}\n", err.file, err.line, err.message));
    }
    if dataset.row_errors.len() > 5 {
        out.push_str(&format!("  ... and {} more\n", dataset.row_errors.len() - 5));
    }

    out
}

/// Message line plus one row per bucket.
pub fn format_rates_view(view: &RatesView) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{} ({}, {} of {} bucket(s) with data):\n",
        view.figure.title,
        view.series.frequency.display_name(),
        view.series.non_empty_len(),
        view.series.buckets.len()
    ));
    out.push_str(&format!("{:<12} {:<12} {:>12} {:>6}\n", "start", "end", "mean", "n"));
    for b in &view.series.buckets {
        let mean = b.mean.map(|m| format!("{m:.6}")).unwrap_or_else(|| "-".to_string());
        let marker = if b.end == view.extremes.peak.date && b.mean == Some(view.extremes.peak.value) {
            " peak"
        } else if b.end == view.extremes.low.date && b.mean == Some(view.extremes.low.value) {
            " low"
        } else {
            ""
        };
        out.push_str(&format!(
            "{:<12} {:<12} {:>12} {:>6}{marker}\n",
            b.start.to_string(),
            b.end.to_string(),
            mean,
            b.count
        ));
    }
    out.push('\n');
    out.push_str(&view.message);
    out.push('\n');

    out
}

/// Message line plus the synthetic trend table.
pub fn format_live_view(view: &LiveView) -> String {
    let mut out = String::new();

    out.push_str(&view.message);
    out.push('\n');
    out.push_str("\nIllustrative trend (synthetic, +5% per step):\n");
    for p in &view.trend {
        out.push_str(&format!("{:>4} {:>14.6}\n", p.step, p.value));
    }

    out
}

pub fn format_currency_table() -> String {
    let mut out = String::new();
    for (code, name) in CURRENCIES {
        out.push_str(&format!("{code}  {name}\n"));
    }
    out
}
