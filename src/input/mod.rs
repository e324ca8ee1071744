use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

use crate::error::CalibrationError;
use crate::model::catalog::ClassCatalog;

pub mod json;
pub mod tsv;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Tsv,
    Json,
}

/// One exported model output, identified by its image or request id.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub id: String,
    pub scores: Vec<f64>,
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Picks the format from the file name, ignoring a trailing `.gz`.
pub fn detect_format(path: &Path) -> Result<InputFormat, InputError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    if name.ends_with(".tsv") || name.ends_with(".txt") {
        Ok(InputFormat::Tsv)
    } else if name.ends_with(".json") {
        Ok(InputFormat::Json)
    } else {
        Err(InputError::InvalidInput(format!(
            "cannot infer input format from {}; pass --format",
            path.display()
        )))
    }
}

pub fn load_scores(
    path: &Path,
    format: Option<InputFormat>,
    catalog: &ClassCatalog,
) -> Result<Vec<ScoreRecord>, InputError> {
    let format = match format {
        Some(f) => f,
        None => detect_format(path)?,
    };
    let mut reader = open_maybe_gz(path)?;
    let records = match format {
        InputFormat::Tsv => tsv::parse_scores_tsv(&mut reader, catalog)?,
        InputFormat::Json => {
            let mut text = String::new();
            reader.read_to_string(&mut text)?;
            json::parse_scores_json(&text, catalog)?
        }
    };

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "loaded score records"
    );
    Ok(records)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
