//! Interactive CSV picker.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `fxdash` and choose the CSV files to upload" UX
//!
//! The picker searches for `*.csv` files under the current working directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Default directory recursion depth for finding CSV files.
const DEFAULT_SEARCH_DEPTH: usize = 4;

/// Parsed picker input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selection {
    Quit,
    All,
    /// Zero-based indices into the discovered list, deduplicated and in input order.
    Indices(Vec<usize>),
    Path(PathBuf),
}

/// Prompt the user to select one or more CSV files from the current directory tree.
///
/// Behavior:
/// - list discovered `*.csv` files
/// - accept numbers from the list (`1,3` or `1 3`), `a` for all, or an explicit path
/// - `q` cancels
pub fn prompt_for_csv_paths() -> Result<Vec<PathBuf>, AppError> {
    let files = discover_csv_files();
    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No .csv files found. Provide one with `fxdash rates -f <file.csv>`.",
        ));
    }

    println!("Found {} CSV file(s):", files.len());
    for (idx, path) in files.iter().enumerate() {
        println!("{:>3}) {}", idx + 1, pretty_path(path));
    }

    loop {
        print!(
            "Select files by number (1-{}, comma separated), a for all, or type a path (q to quit): ",
            files.len()
        );
        io::stdout()
            .flush()
            .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

        let mut input = String::new();
        let bytes = io::stdin()
            .read_line(&mut input)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Provide CSV paths with `fxdash rates -f <file.csv>`.",
            ));
        }

        match parse_selection(&input, files.len()) {
            Ok(Selection::Quit) => return Err(AppError::new(2, "Canceled.")),
            Ok(Selection::All) => return Ok(files),
            Ok(Selection::Indices(indices)) => {
                return indices.into_iter().map(|i| validate_csv_path(&files[i])).collect();
            }
            Ok(Selection::Path(candidate)) => match validate_csv_path(&candidate) {
                Ok(path) => return Ok(vec![path]),
                Err(err) => println!("{err}"),
            },
            Err(msg) => println!("{msg}"),
        }
    }
}

fn parse_selection(input: &str, available: usize) -> Result<Selection, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Nothing selected.".to_string());
    }
    if input.eq_ignore_ascii_case("q") {
        return Ok(Selection::Quit);
    }
    if input.eq_ignore_ascii_case("a") || input.eq_ignore_ascii_case("all") {
        return Ok(Selection::All);
    }

    let tokens: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if !tokens.iter().all(|t| t.bytes().all(|b| b.is_ascii_digit())) {
        return Ok(Selection::Path(PathBuf::from(input)));
    }

    let mut indices = Vec::with_capacity(tokens.len());
    for token in tokens {
        let choice: usize = token
            .parse()
            .map_err(|_| format!("Invalid choice: {token}."))?;
        if !(1..=available).contains(&choice) {
            return Err(format!(
                "Invalid choice: {choice}. Enter numbers between 1 and {available}."
            ));
        }
        if !indices.contains(&(choice - 1)) {
            indices.push(choice - 1);
        }
    }
    Ok(Selection::Indices(indices))
}

/// Validate the provided path points to a `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(
            2,
            format!("CSV file not found: {}", path.display()),
        ));
    }
    if path.is_dir() {
        return Err(AppError::new(
            2,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if !has_csv_extension(path) {
        return Err(AppError::new(
            2,
            format!(
                "Expected a .csv file (got: {}). Use -f to pass a CSV path.",
                path.display()
            ),
        ));
    }

    Ok(path.to_path_buf())
}

/// Discover `*.csv` files under the current directory (deterministic order).
pub fn discover_csv_files() -> Vec<PathBuf> {
    find_csv_files(Path::new("."), DEFAULT_SEARCH_DEPTH)
}

fn find_csv_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_csv_files_inner(root, 0, max_depth, &mut out);
    out.sort_by_key(|p| pretty_path(p));
    out
}

fn find_csv_files_inner(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if !should_skip_dir(&path) {
                find_csv_files_inner(&path, depth + 1, max_depth, out);
            }
        } else if file_type.is_file() && has_csv_extension(&path) {
            out.push(path);
        }
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules")
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}
