//! CSV ingest and normalization.
//!
//! This module turns one or more exchange-rate CSV files into a single list of
//! `(date, target, rate)` observations.
//!
//! Design goals:
//! - **Explicit schema contract**: the date/target/rate columns are resolved
//!   once per file and must agree across all files (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior**: files are concatenated in the order given

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use rayon::prelude::*;

use crate::domain::{Observation, SchemaOverrides};
use crate::error::AppError;

/// Accepted observation years.
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Header name preferred for the target-currency column.
const TARGET_COLUMN: &str = "targetcurrency";

/// Header names recognized as the rate column, in priority order.
const RATE_COLUMNS: [&str; 5] = ["exchangerate", "exchange_rate", "rate", "value", "close"];

/// A resolved column: display name as written in the file + position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub index: usize,
}

/// The resolved column contract for the input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSchema {
    pub date: Column,
    pub target: Column,
    pub rate: Column,
}

impl CsvSchema {
    /// Schemas agree when they name the same columns (case-insensitive).
    pub fn same_columns(&self, other: &CsvSchema) -> bool {
        [(&self.date, &other.date), (&self.target, &other.target), (&self.rate, &other.rate)]
            .iter()
            .all(|(a, b)| normalize_header_name(&a.name) == normalize_header_name(&b.name))
    }

    pub fn describe(&self) -> String {
        format!(
            "date=`{}`, target=`{}`, rate=`{}`",
            self.date.name, self.target.name, self.rate.name
        )
    }
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub file: String,
    pub line: usize,
    pub message: String,
}

/// Per-file ingest counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub file: String,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Parsed content of a single file.
#[derive(Debug, Clone)]
pub struct FileData {
    pub schema: CsvSchema,
    pub observations: Vec<Observation>,
    pub row_errors: Vec<RowError>,
    pub summary: FileSummary,
}

/// The combined dataset all rates-dashboard callbacks read from.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub schema: CsvSchema,
    pub observations: Vec<Observation>,
    pub files: Vec<FileSummary>,
    pub row_errors: Vec<RowError>,
}

impl Dataset {
    /// Concatenate per-file data, rejecting files whose schema disagrees with the first.
    pub fn combine(files: Vec<FileData>) -> Result<Self, AppError> {
        let mut iter = files.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| AppError::new(2, "No input files were provided."))?;

        let schema = first.schema;
        let mut observations = first.observations;
        let mut row_errors = first.row_errors;
        let mut summaries = vec![first.summary];

        for data in iter {
            if !data.schema.same_columns(&schema) {
                return Err(AppError::new(
                    2,
                    format!(
                        "Schema mismatch in '{}': resolved {} but expected {}.",
                        data.summary.file,
                        data.schema.describe(),
                        schema.describe()
                    ),
                ));
            }
            observations.extend(data.observations);
            row_errors.extend(data.row_errors);
            summaries.push(data.summary);
        }

        if observations.is_empty() {
            return Err(AppError::new(3, "No valid rows found in the input files."));
        }

        Ok(Self {
            schema,
            observations,
            files: summaries,
            row_errors,
        })
    }

    /// Distinct target values in first-appearance order.
    pub fn targets(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.observations
            .iter()
            .filter(|o| seen.insert(o.target.as_str()))
            .map(|o| o.target.clone())
            .collect()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.observations.iter().map(|o| o.date).min()?;
        let max = self.observations.iter().map(|o| o.date).max()?;
        Some((min, max))
    }

    pub fn rows_read(&self) -> usize {
        self.files.iter().map(|f| f.rows_read).sum()
    }
}

/// Load every file (in parallel) and combine them in the order given.
pub fn load_dataset(paths: &[PathBuf], overrides: &SchemaOverrides) -> Result<Dataset, AppError> {
    if paths.is_empty() {
        return Err(AppError::new(2, "No input files were provided."));
    }

    let files = paths
        .par_iter()
        .map(|path| load_file(path, overrides))
        .collect::<Result<Vec<_>, AppError>>()?;

    let dataset = Dataset::combine(files)?;
    log::info!(
        "loaded {} observation(s) from {} file(s) ({})",
        dataset.observations.len(),
        dataset.files.len(),
        dataset.schema.describe()
    );
    for err in &dataset.row_errors {
        log::warn!("{}:{}: {}", err.file, err.line, err.message);
    }
    Ok(dataset)
}

fn load_file(path: &Path, overrides: &SchemaOverrides) -> Result<FileData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_observations(file, &path.display().to_string(), overrides)
}

/// Parse one CSV source into observations.
pub fn read_observations<R: Read>(
    source: R,
    name: &str,
    overrides: &SchemaOverrides,
) -> Result<FileData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers in '{name}': {e}")))?
        .clone();

    let schema = resolve_schema(&headers, overrides)
        .map_err(|e| AppError::new(e.exit_code(), format!("{name}: {e}")))?;

    let mut observations = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| parse_row(&record, &schema));

        match parsed {
            Ok(obs) => observations.push(obs),
            Err(message) => row_errors.push(RowError {
                file: name.to_string(),
                line,
                message,
            }),
        }
    }

    let summary = FileSummary {
        file: name.to_string(),
        rows_read,
        rows_used: observations.len(),
    };

    Ok(FileData {
        schema,
        observations,
        row_errors,
        summary,
    })
}

/// Resolve the date, target and rate columns for a header row.
///
/// Rules, unless overridden by name:
/// - date: the first column
/// - target: `TargetCurrency` if present, else the second column
/// - rate: the first recognized rate header, else the first remaining column
pub fn resolve_schema(headers: &StringRecord, overrides: &SchemaOverrides) -> Result<CsvSchema, AppError> {
    let header_map = build_header_map(headers);
    let column = |index: usize| Column {
        name: headers.get(index).unwrap_or("").trim().trim_start_matches('\u{feff}').to_string(),
        index,
    };
    let named = |name: &str| -> Result<Column, AppError> {
        header_map
            .get(&normalize_header_name(name))
            .map(|&idx| column(idx))
            .ok_or_else(|| AppError::new(2, format!("Missing required column: `{name}`")))
    };

    if headers.len() < 3 {
        return Err(AppError::new(
            2,
            format!(
                "Expected at least 3 columns (date, target, rate), found {}.",
                headers.len()
            ),
        ));
    }

    let date = match &overrides.date_column {
        Some(name) => named(name)?,
        None => column(0),
    };

    let target = match &overrides.target_column {
        Some(name) => named(name)?,
        None => match header_map.get(TARGET_COLUMN) {
            Some(&idx) => column(idx),
            None => column(1),
        },
    };

    let rate = match &overrides.rate_column {
        Some(name) => named(name)?,
        None => RATE_COLUMNS
            .iter()
            .filter_map(|n| header_map.get(*n).copied())
            .find(|&idx| idx != date.index && idx != target.index)
            .or_else(|| (0..headers.len()).find(|&idx| idx != date.index && idx != target.index))
            .map(column)
            .ok_or_else(|| AppError::new(2, "Could not resolve a rate column."))?,
    };

    if date.index == target.index || date.index == rate.index || target.index == rate.index {
        return Err(AppError::new(
            2,
            format!(
                "Date, target and rate must be distinct columns (resolved date=`{}`, target=`{}`, rate=`{}`).",
                date.name, target.name, rate.name
            ),
        ));
    }

    Ok(CsvSchema { date, target, rate })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // Keep the first occurrence of duplicated headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, named columns will not resolve.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(record: &StringRecord, schema: &CsvSchema) -> Result<Observation, String> {
    let date = parse_date(get_required(record, &schema.date)?)?;
    let target = get_required(record, &schema.target)?.to_string();
    let raw_rate = get_required(record, &schema.rate)?;
    let rate = raw_rate
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid `{}` value '{raw_rate}'.", schema.rate.name))?;

    Ok(Observation { date, target, rate })
}

fn get_required<'a>(record: &'a StringRecord, column: &Column) -> Result<&'a str, String> {
    record
        .get(column.index)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{}`", column.name))
}

/// Parse a date cell, accepting a small set of common formats.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const DATE_FMTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
    const DATETIME_FMTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    let parsed = DATE_FMTS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FMTS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        });

    if let Some(date) = parsed {
        // Calendar buckets step past the last date, so keep to four-digit years.
        if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            return Err(format!("Date '{s}' is outside the supported years {MIN_YEAR}-{MAX_YEAR}."));
        }
        return Ok(date);
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, DD/MM/YYYY, DD-MM-YYYY (optionally with a time)."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(csv: &str) -> Result<FileData, AppError> {
        read_observations(csv.as_bytes(), "test.csv", &SchemaOverrides::default())
    }

    #[test]
    fn prefers_target_currency_column() {
        let data = read("Date,Rate,TargetCurrency\n2023-01-01,1.05,EUR\n2023-01-02,0.85,GBP\n").unwrap();
        assert_eq!(data.schema.target.name, "TargetCurrency");
        assert_eq!(data.schema.rate.name, "Rate");
        assert_eq!(data.observations.len(), 2);
        assert_eq!(data.observations[1].target, "GBP");
        assert_eq!(data.observations[1].rate, 0.85);
    }

    #[test]
    fn falls_back_to_second_column_for_target() {
        let data = read("day,pair,px\n2023-01-01,USD/EUR,0.93\n").unwrap();
        assert_eq!(data.schema.date.name, "day");
        assert_eq!(data.schema.target.name, "pair");
        assert_eq!(data.schema.rate.name, "px");
        assert_eq!(data.observations[0].target, "USD/EUR");
    }

    #[test]
    fn overrides_pick_named_columns() {
        let overrides = SchemaOverrides {
            date_column: Some("when".to_string()),
            target_column: Some("code".to_string()),
            rate_column: Some("mid".to_string()),
        };
        let csv = "id,code,when,bid,mid\n1,JPY,2023-02-01,140.1,140.3\n";
        let data = read_observations(csv.as_bytes(), "o.csv", &overrides).unwrap();
        assert_eq!(data.schema.date.index, 2);
        assert_eq!(data.schema.rate.index, 4);
        assert_eq!(data.observations[0].rate, 140.3);

        let missing = SchemaOverrides {
            rate_column: Some("ask".to_string()),
            ..SchemaOverrides::default()
        };
        let err = read_observations(csv.as_bytes(), "o.csv", &missing).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bad_rows_are_reported_not_fatal() {
        let csv = "\u{feff}Date,TargetCurrency,ExchangeRate\n\
                   2023-01-01,EUR,1.0\n\
                   not-a-date,EUR,1.1\n\
                   2023-01-03,,1.2\n\
                   2023-01-04,EUR,abc\n\
                   2023-01-05 12:30:00,EUR,1.3\n";
        let data = read(csv).unwrap();
        assert_eq!(data.schema.date.name, "Date");
        assert_eq!(data.summary.rows_read, 5);
        assert_eq!(data.summary.rows_used, 2);
        let lines: Vec<usize> = data.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
    }

    #[test]
    fn too_few_columns_is_an_error() {
        let err = read("Date,Rate\n2023-01-01,1.0\n").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn combine_rejects_mismatched_schemas() {
        let a = read("Date,TargetCurrency,Rate\n2023-01-01,EUR,1.0\n").unwrap();
        let b = read("Date,Symbol,Close\n2023-01-01,EUR,1.0\n").unwrap();
        let err = Dataset::combine(vec![a, b]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("Schema mismatch"));
    }

    #[test]
    fn combine_concatenates_and_orders_targets() {
        let a = read("Date,TargetCurrency,Rate\n2023-01-01,GBP,0.8\n2023-01-01,EUR,1.0\n").unwrap();
        let b = read("date,targetcurrency,rate\n2023-01-02,JPY,130\n2023-01-02,EUR,1.1\n").unwrap();
        let dataset = Dataset::combine(vec![a, b]).unwrap();
        assert_eq!(dataset.observations.len(), 4);
        assert_eq!(dataset.targets(), vec!["GBP", "EUR", "JPY"]);
        assert_eq!(dataset.rows_read(), 4);
        assert_eq!(
            dataset.date_range(),
            Some((
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
            ))
        );
    }

    #[test]
    fn combine_requires_observations() {
        let empty = read("Date,TargetCurrency,Rate\n").unwrap();
        assert_eq!(Dataset::combine(vec![empty]).unwrap_err().exit_code(), 3);
        assert_eq!(Dataset::combine(Vec::new()).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 9).unwrap();
        for s in ["2023-03-09", "2023/03/09", "09/03/2023", "09-03-2023", "2023-03-09T08:00:00"] {
            assert_eq!(parse_date(s).unwrap(), expected, "{s}");
        }
        assert!(parse_date("March 9").is_err());
    }

    #[test]
    fn extended_years_become_row_errors() {
        assert!(parse_date("+262142-12-31").is_err());
        assert!(parse_date("9999-12-31").is_ok());

        let data = read("Date,TargetCurrency,Rate\n+262142-12-31,EUR,1.0\n9999-12-30,EUR,1.2\n").unwrap();
        assert_eq!(data.summary.rows_used, 1);
        assert_eq!(data.row_errors[0].line, 2);

        let dataset = Dataset::combine(vec![data]).unwrap();
        for frequency in crate::domain::Frequency::ALL {
            let points = crate::resample::select_target(&dataset.observations, "EUR");
            let series = crate::resample::resample_mean(&points, frequency);
            assert_eq!(series.non_empty_len(), 1, "{frequency:?}");
        }
    }

    #[test]
    fn load_dataset_keeps_file_order() {
        let dir = std::env::temp_dir().join(format!("fxdash_ingest_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let first = dir.join("a.csv");
        let second = dir.join("b.csv");
        std::fs::write(&first, "Date,TargetCurrency,Rate\n2023-01-01,JPY,130\n2023-01-02,EUR,1.0\n").unwrap();
        std::fs::write(&second, "Date,TargetCurrency,Rate\n2023-01-03,GBP,0.8\n2023-01-03,JPY,131\n").unwrap();

        let dataset = load_dataset(&[second.clone(), first.clone()], &SchemaOverrides::default()).unwrap();
        assert_eq!(dataset.targets(), vec!["GBP", "JPY", "EUR"]);
        assert_eq!(dataset.files[0].file, second.display().to_string());
        assert_eq!(dataset.observations.len(), 4);

        let missing = dir.join("missing.csv");
        let err = load_dataset(&[first, missing], &SchemaOverrides::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("missing.csv"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
