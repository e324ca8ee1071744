use serde::Deserialize;

use crate::error::CalibrationError;
use crate::input::{InputError, ScoreRecord};
use crate::model::catalog::ClassCatalog;

#[derive(Debug, Deserialize)]
struct JsonRecord {
    id: String,
    scores: Vec<f64>,
}

pub fn parse_scores_json(text: &str, catalog: &ClassCatalog) -> Result<Vec<ScoreRecord>, InputError> {
    let rows: Vec<JsonRecord> =
        serde_json::from_str(text).map_err(|e| InputError::Parse(e.to_string()))?;
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        if row.scores.len() != catalog.len() {
            return Err(
                CalibrationError::shape("score row", catalog.len(), row.scores.len()).into(),
            );
        }
        records.push(ScoreRecord {
            id: row.id,
            scores: row.scores,
        });
    }
    Ok(records)
}
