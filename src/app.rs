//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - configures logging
//! - loads CSV files or fetches live rates
//! - starts a dashboard or prints reports/plots
//! - writes optional exports

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Parser;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::cli::{Command, InputArgs, PlotArgs, RatesArgs, SummaryArgs, TrendArgs};
use crate::dashboard::live::LiveDashboard;
use crate::dashboard::rates::RatesDashboard;
use crate::data::OpenRatesClient;
use crate::error::AppError;
use crate::io::ingest::{Dataset, load_dataset};

pub mod pipeline;

const DEFAULT_LOG_FILTER: &str = "warn,fx_dashboards=info";

/// Entry point for the `fxdash` binary.
pub fn run() -> Result<(), AppError> {
    // `fxdash` and `fxdash -f rates.csv` behave like `fxdash rates ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let interactive = matches!(cli.command, Command::Rates(_) | Command::Live(_));
    init_logging(cli.log_file.as_deref(), interactive)?;

    match cli.command {
        Command::Rates(args) => handle_rates(args),
        Command::Summary(args) => handle_summary(args),
        Command::Live(pair) => {
            let dashboard = LiveDashboard::new(OpenRatesClient::from_env()).with_pair(&pair.base, &pair.target)?;
            crate::tui::run(dashboard)
        }
        Command::Trend(args) => handle_trend(args),
        Command::Plot(args) => handle_plot(args),
        Command::Currencies => {
            println!("{}", crate::report::format_currency_table());
            Ok(())
        }
    }
}

/// Configure `env_logger`.
///
/// `RUST_LOG` wins when set. Line-oriented commands log to stderr; the dashboards
/// own the terminal, so they only log when `--log-file` is given.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<(), AppError> {
    if interactive && log_file.is_none() {
        log::set_max_level(LevelFilter::Off);
        return Ok(());
    }

    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER));
    builder.format_timestamp_millis();

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| AppError::new(2, format!("Failed to create log file '{}': {e}", path.display())))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| AppError::new(4, format!("Failed to initialize logging: {e}")))
}

fn handle_rates(args: RatesArgs) -> Result<(), AppError> {
    let dataset = load_input(&args.input)?;
    let dashboard = RatesDashboard::new(dataset).with_defaults(args.target, args.interval)?;
    crate::tui::run(dashboard)
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let dataset = load_input(&args.rates.input)?;
    println!("{}", crate::report::format_dataset_summary(&dataset));

    let target = match args.rates.target {
        Some(target) => target,
        None => dataset
            .targets()
            .into_iter()
            .next()
            .ok_or_else(|| AppError::new(3, "Dataset has no target currencies."))?,
    };

    let view = pipeline::rates_view(&dataset, &target, args.rates.interval)?;
    println!("{}", crate::report::format_rates_view(&view));

    if !args.plot.no_plot {
        let plot = crate::plot::render_ascii_plot(&view.figure, args.plot.width, args.plot.height);
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &args.export {
        crate::io::export::write_series_csv(path, &view.target, &view.series)?;
    }
    if let Some(path) = &args.export_figure {
        crate::io::figure::write_figure_json(path, &view.figure)?;
    }

    Ok(())
}

fn handle_trend(args: TrendArgs) -> Result<(), AppError> {
    let provider = OpenRatesClient::from_env();
    let view = pipeline::live_view(&provider, &args.pair.base, &args.pair.target)?;
    println!("{}", crate::report::format_live_view(&view));

    if !args.plot.no_plot {
        let plot = crate::plot::render_ascii_plot(&view.figure, args.plot.width, args.plot.height);
        println!("{plot}");
    }

    if let Some(path) = &args.export_figure {
        crate::io::figure::write_figure_json(path, &view.figure)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let figure = crate::io::figure::read_figure_json(&args.figure)?;
    let plot = crate::plot::render_ascii_plot(&figure, args.width, args.height);
    println!("{plot}");
    Ok(())
}

/// Resolve input paths (flags or picker) and load the combined dataset.
fn load_input(input: &InputArgs) -> Result<Dataset, AppError> {
    let files: Vec<PathBuf> = if input.files.is_empty() {
        crate::cli::picker::prompt_for_csv_paths()?
    } else {
        input.files.clone()
    };
    load_dataset(&files, &input.schema_overrides())
}

/// Rewrite argv so `fxdash` defaults to `fxdash rates`.
///
/// Rules:
/// - `fxdash`                      -> `fxdash rates`
/// - `fxdash -f a.csv ...`         -> `fxdash rates -f a.csv ...`
/// - `fxdash --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("rates".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "rates" | "summary" | "live" | "trend" | "plot" | "currencies"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "rates flags".
    if arg1.starts_with('-') {
        argv.insert(1, "rates".to_string());
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_rates_dashboard() {
        assert_eq!(rewrite_args(argv(&["fxdash"])), argv(&["fxdash", "rates"]));
    }

    #[test]
    fn leading_flags_go_to_rates() {
        assert_eq!(
            rewrite_args(argv(&["fxdash", "-f", "a.csv", "--interval", "m"])),
            argv(&["fxdash", "rates", "-f", "a.csv", "--interval", "m"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            argv(&["fxdash", "live", "--base", "GBP"]),
            argv(&["fxdash", "currencies"]),
            argv(&["fxdash", "--help"]),
            argv(&["fxdash", "-V"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn logging_installs_once() {
        let path = std::env::temp_dir().join(format!("fxdash_log_{}.log", std::process::id()));
        init_logging(Some(path.as_path()), true).unwrap();
        assert!(path.exists());

        let err = init_logging(None, false).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rewritten_argv_parses() {
        let cli = crate::cli::Cli::parse_from(rewrite_args(argv(&["fxdash", "-f", "a.csv"])));
        assert!(matches!(cli.command, Command::Rates(ref r) if r.input.files.len() == 1));
    }
}
