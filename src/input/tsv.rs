use std::io::BufRead;

use crate::error::CalibrationError;
use crate::input::{InputError, ScoreRecord};
use crate::model::catalog::ClassCatalog;

/// Header is `id` followed by the catalog class identifiers in catalog order.
pub fn parse_scores_tsv<R: BufRead>(
    mut reader: R,
    catalog: &ClassCatalog,
) -> Result<Vec<ScoreRecord>, InputError> {
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Err(InputError::Parse("score file is empty".to_string()));
    }
    let header: Vec<&str> = buf.trim_end().split('\t').map(|s| s.trim()).collect();
    validate_header(&header, catalog)?;

    let mut records = Vec::new();
    let mut line_no = 1usize;
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end();
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let id = fields[0].trim();
        if id.is_empty() {
            return Err(InputError::Parse(format!("empty id on line {line_no}")));
        }
        if fields.len() - 1 != catalog.len() {
            return Err(CalibrationError::shape("score row", catalog.len(), fields.len() - 1).into());
        }
        let mut scores = Vec::with_capacity(catalog.len());
        for raw in &fields[1..] {
            let v: f64 = raw.trim().parse().map_err(|_| {
                InputError::Parse(format!("invalid score '{}' on line {line_no}", raw.trim()))
            })?;
            scores.push(v);
        }
        records.push(ScoreRecord {
            id: id.to_string(),
            scores,
        });
    }
    Ok(records)
}

fn validate_header(header: &[&str], catalog: &ClassCatalog) -> Result<(), InputError> {
    if header.first().map(|h| h.to_ascii_lowercase()) != Some("id".to_string()) {
        return Err(InputError::Parse(
            "score file header must start with an 'id' column".to_string(),
        ));
    }
    let columns = &header[1..];
    if columns.len() != catalog.len() {
        return Err(CalibrationError::shape("score header", catalog.len(), columns.len()).into());
    }
    for (col, class) in columns.iter().zip(catalog.iter()) {
        if *col != class.code {
            return Err(InputError::InvalidInput(format!(
                "score column '{}' does not match catalog class '{}'",
                col, class.code
            )));
        }
    }
    Ok(())
}
