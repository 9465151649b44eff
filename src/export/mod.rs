//! Trace serialization: CSV (one row per trip) and JSON.

pub mod csv;
pub mod json;

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::config::TripModel;
use crate::simulation::Trace;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

/// Write `trace` to any writer. The CSV column set depends on `model`.
pub fn write_trace<W: Write>(
    writer: W,
    trace: &Trace,
    model: TripModel,
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => csv::write_csv(writer, trace, model),
        ExportFormat::Json => json::write_json(writer, trace),
    }
}

pub fn write_trace_file(
    path: &Path,
    trace: &Trace,
    model: TripModel,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_trace(&mut writer, trace, model, format)?;
    writer.flush()?;

    info!(path = %path.display(), %format, days = trace.len(), "trace written");
    Ok(())
}
