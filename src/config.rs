use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::InputError;
use crate::model::adjustment::{AdjustmentTable, ClassAdjustment};
use crate::model::catalog::ClassCatalog;

/// On-disk form of a deployment's adjustment table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFile {
    pub classes: Vec<ClassAdjustment>,
}

impl TableFile {
    pub fn from_table(table: &AdjustmentTable) -> Self {
        Self {
            classes: table.entries().to_vec(),
        }
    }

    pub fn into_table(self, catalog: &ClassCatalog) -> Result<AdjustmentTable, InputError> {
        Ok(AdjustmentTable::new(self.classes, catalog)?)
    }
}

pub fn load_table(path: &Path, catalog: &ClassCatalog) -> Result<AdjustmentTable, InputError> {
    let text = std::fs::read_to_string(path)?;
    let file: TableFile = serde_json::from_str(&text)
        .map_err(|e| InputError::Parse(format!("{}: {e}", path.display())))?;
    let table = file.into_table(catalog)?;
    tracing::info!(
        path = %path.display(),
        majority = table.majority_class().unwrap_or("none"),
        "loaded adjustment table"
    );
    Ok(table)
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
