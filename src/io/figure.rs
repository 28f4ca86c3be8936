//! Read/write figure JSON files.
//!
//! Figure JSON is the "portable" representation of a dashboard chart: title,
//! axis labels, line segments and annotations. `fxdash plot` renders it again
//! without the original data. The schema is defined by `domain::FigureFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{Figure, FigureFile};
use crate::error::AppError;

const TOOL: &str = "fxdash";

/// Write a figure JSON file.
pub fn write_figure_json(path: &Path, figure: &Figure) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create figure JSON '{}': {e}", path.display())))?;

    let doc = FigureFile {
        tool: TOOL.to_string(),
        figure: figure.clone(),
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write figure JSON: {e}")))?;

    log::info!("wrote figure '{}' to {}", figure.title, path.display());
    Ok(())
}

/// Read a figure JSON file.
pub fn read_figure_json(path: &Path) -> Result<Figure, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open figure JSON '{}': {e}", path.display())))?;
    let doc: FigureFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid figure JSON: {e}")))?;
    if doc.tool != TOOL {
        log::warn!("figure JSON was written by '{}', not {TOOL}", doc.tool);
    }
    Ok(doc.figure)
}
