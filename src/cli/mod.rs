//! Command-line parsing for the exchange-rate dashboards.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the data shaping and rendering code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Frequency, SchemaOverrides};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fxdash", version, about = "Currency exchange rate dashboards")]
pub struct Cli {
    /// Write log output to this file (interactive dashboards log nowhere otherwise).
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive dashboard for exchange rates loaded from CSV files.
    Rates(RatesArgs),
    /// Print the resampled series for one target (useful for scripting).
    Summary(SummaryArgs),
    /// Interactive dashboard for a live exchange rate.
    Live(PairArgs),
    /// Print the live rate and its illustrative trend.
    Trend(TrendArgs),
    /// Plot a previously exported figure JSON.
    Plot(PlotArgs),
    /// List the supported currency codes.
    Currencies,
}

/// Input files and schema overrides.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// CSV file(s) to load; prompts with a file picker when omitted.
    #[arg(short = 'f', long = "file", value_name = "CSV")]
    pub files: Vec<PathBuf>,

    /// Column holding the observation date (default: first column).
    #[arg(long)]
    pub date_column: Option<String>,

    /// Column holding the target currency (default: `TargetCurrency`, else second column).
    #[arg(long)]
    pub target_column: Option<String>,

    /// Column holding the rate (default: `ExchangeRate`/`Rate`/`Value`/`Close`, else next free column).
    #[arg(long)]
    pub rate_column: Option<String>,
}

impl InputArgs {
    pub fn schema_overrides(&self) -> SchemaOverrides {
        SchemaOverrides {
            date_column: self.date_column.clone(),
            target_column: self.target_column.clone(),
            rate_column: self.rate_column.clone(),
        }
    }
}

/// Options for the interactive rates dashboard.
#[derive(Debug, Args, Clone)]
pub struct RatesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Initially selected target (default: first target found).
    #[arg(short = 't', long)]
    pub target: Option<String>,

    /// Initially selected resampling interval.
    #[arg(short = 'i', long, value_enum, default_value_t = Frequency::Weekly)]
    pub interval: Frequency,
}

/// Options for `fxdash summary`.
#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub rates: RatesArgs,

    #[command(flatten)]
    pub plot: PlotOptions,

    /// Export the resampled series to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the chart to figure JSON.
    #[arg(long = "export-figure")]
    pub export_figure: Option<PathBuf>,
}

/// Base/target currency pair.
#[derive(Debug, Args, Clone)]
pub struct PairArgs {
    /// Currency to convert from.
    #[arg(short = 'b', long, default_value = crate::dashboard::live::DEFAULT_BASE)]
    pub base: String,

    /// Currency to convert into.
    #[arg(short = 't', long, default_value = crate::dashboard::live::DEFAULT_TARGET)]
    pub target: String,
}

/// Options for `fxdash trend`.
#[derive(Debug, Args, Clone)]
pub struct TrendArgs {
    #[command(flatten)]
    pub pair: PairArgs,

    #[command(flatten)]
    pub plot: PlotOptions,

    /// Export the chart to figure JSON.
    #[arg(long = "export-figure")]
    pub export_figure: Option<PathBuf>,
}

/// Terminal plot options shared by the printing commands.
#[derive(Debug, Args, Clone)]
pub struct PlotOptions {
    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for plotting a saved figure.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Figure JSON file produced by `--export-figure`.
    #[arg(long, value_name = "JSON")]
    pub figure: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn summary_accepts_interval_aliases() {
        let cli = Cli::parse_from([
            "fxdash", "summary", "-f", "a.csv", "-f", "b.csv", "--interval", "q", "--target", "EUR",
            "--no-plot",
        ]);
        let Command::Summary(args) = cli.command else {
            panic!("expected summary");
        };
        assert_eq!(args.rates.input.files.len(), 2);
        assert_eq!(args.rates.interval, Frequency::Quarterly);
        assert_eq!(args.rates.target.as_deref(), Some("EUR"));
        assert!(args.plot.no_plot);
    }

    #[test]
    fn live_defaults_to_usd_eur() {
        let cli = Cli::parse_from(["fxdash", "live"]);
        let Command::Live(pair) = cli.command else {
            panic!("expected live");
        };
        assert_eq!(pair.base, "USD");
        assert_eq!(pair.target, "EUR");
    }
}
