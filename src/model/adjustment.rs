use serde::{Deserialize, Serialize};

use crate::error::{CalibrationError, Result};
use crate::model::catalog::ClassCatalog;

/// One class's post-hoc correction. The majority class is suppressed
/// (multiplier below 1), every other class is boosted or left alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAdjustment {
    pub class: String,
    pub multiplier: f64,
    #[serde(default)]
    pub majority: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentTable {
    entries: Vec<ClassAdjustment>,
}

impl AdjustmentTable {
    /// Validates `entries` against `catalog` and reorders them to catalog order.
    pub fn new(entries: Vec<ClassAdjustment>, catalog: &ClassCatalog) -> Result<Self> {
        if entries.len() != catalog.len() {
            return Err(CalibrationError::shape(
                "adjustment table",
                catalog.len(),
                entries.len(),
            ));
        }

        let mut ordered: Vec<Option<ClassAdjustment>> = vec![None; catalog.len()];
        let mut majority_count = 0usize;
        for entry in entries {
            validate_entry(&entry)?;
            if entry.majority {
                majority_count += 1;
            }
            let idx = catalog.index_of(&entry.class).ok_or_else(|| {
                CalibrationError::invalid(format!(
                    "adjustment table names unknown class '{}'",
                    entry.class
                ))
            })?;
            if ordered[idx].is_some() {
                return Err(CalibrationError::invalid(format!(
                    "adjustment table lists class '{}' twice",
                    entry.class
                )));
            }
            ordered[idx] = Some(entry);
        }
        if majority_count > 1 {
            return Err(CalibrationError::invalid(format!(
                "adjustment table marks {majority_count} majority classes, at most one is allowed"
            )));
        }

        // Equal lengths and no duplicates leave no gaps.
        let entries = ordered.into_iter().flatten().collect();
        Ok(Self { entries })
    }

    /// HAM10000 correction: `nv` is vastly overrepresented in training,
    /// `akiec`, `df` and `vasc` are the rarest classes.
    pub fn ham10000_v1(catalog: &ClassCatalog) -> Result<Self> {
        let rows: [(&str, f64, bool); 7] = [
            ("akiec", 10.0, false),
            ("bcc", 5.0, false),
            ("bkl", 5.0, false),
            ("df", 10.0, false),
            ("mel", 5.0, false),
            ("nv", 0.1, true),
            ("vasc", 10.0, false),
        ];
        let entries = rows
            .iter()
            .map(|&(class, multiplier, majority)| ClassAdjustment {
                class: class.to_string(),
                multiplier,
                majority,
            })
            .collect();
        Self::new(entries, catalog)
    }

    /// Identity table: every multiplier 1, no majority class.
    pub fn neutral(catalog: &ClassCatalog) -> Self {
        Self {
            entries: catalog
                .iter()
                .map(|c| ClassAdjustment {
                    class: c.code.clone(),
                    multiplier: 1.0,
                    majority: false,
                })
                .collect(),
        }
    }

    pub fn with_multiplier(&self, class: &str, multiplier: f64) -> Result<Self> {
        let mut entries = self.entries.clone();
        let entry = entries
            .iter_mut()
            .find(|e| e.class == class)
            .ok_or_else(|| CalibrationError::invalid(format!("unknown class '{class}'")))?;
        entry.multiplier = multiplier;
        validate_entry(entry)?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ClassAdjustment] {
        &self.entries
    }

    pub fn multiplier(&self, index: usize) -> Option<f64> {
        self.entries.get(index).map(|e| e.multiplier)
    }

    pub fn majority_class(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.majority)
            .map(|e| e.class.as_str())
    }

    pub fn is_neutral(&self) -> bool {
        self.entries.iter().all(|e| e.multiplier == 1.0)
    }

    /// True when the table covers exactly the catalog's classes, in order.
    pub fn matches_catalog(&self, catalog: &ClassCatalog) -> bool {
        self.entries.len() == catalog.len()
            && self
                .entries
                .iter()
                .zip(catalog.iter())
                .all(|(e, c)| e.class == c.code)
    }
}

fn validate_entry(entry: &ClassAdjustment) -> Result<()> {
    if !entry.multiplier.is_finite() || entry.multiplier <= 0.0 {
        return Err(CalibrationError::invalid(format!(
            "multiplier for '{}' must be positive and finite, got {}",
            entry.class, entry.multiplier
        )));
    }
    if entry.majority && entry.multiplier >= 1.0 {
        return Err(CalibrationError::invalid(format!(
            "majority class '{}' must be suppressed (multiplier < 1), got {}",
            entry.class, entry.multiplier
        )));
    }
    if !entry.majority && entry.multiplier < 1.0 {
        return Err(CalibrationError::invalid(format!(
            "minority class '{}' must not be suppressed (multiplier >= 1), got {}",
            entry.class, entry.multiplier
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/adjustment.rs"]
mod tests;
