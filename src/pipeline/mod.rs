pub mod stage1_calibrate;
pub mod stage2_rebalance;
pub mod stage3_rank;
pub mod stage4_classify;
pub mod stage5_report;

use crate::error::{CalibrationError, Result};
use crate::model::adjustment::AdjustmentTable;
use crate::model::catalog::ClassCatalog;
use crate::model::distribution::ScoreVector;
use crate::model::profile::CalibrationProfile;
use stage1_calibrate::calibrate;
use stage2_rebalance::rebalance;
use stage3_rank::top_n;
use stage4_classify::{Prediction, Stage4Inputs, run_stage4};

/// Calibration configuration for one deployment. Immutable once built and
/// safe to share across request handlers.
#[derive(Debug, Clone)]
pub struct Pipeline {
    catalog: ClassCatalog,
    table: AdjustmentTable,
    profile: CalibrationProfile,
}

impl Pipeline {
    pub fn new(
        catalog: ClassCatalog,
        table: AdjustmentTable,
        profile: CalibrationProfile,
    ) -> Result<Self> {
        profile.validate(catalog.len())?;
        if table.len() != catalog.len() {
            return Err(CalibrationError::shape(
                "adjustment table",
                catalog.len(),
                table.len(),
            ));
        }
        if !table.matches_catalog(&catalog) {
            return Err(CalibrationError::invalid(
                "adjustment table classes do not follow catalog order",
            ));
        }

        tracing::info!(
            profile = profile.name,
            temperature = profile.temperature,
            top_n = profile.top_n,
            rebalance = profile.rebalance,
            majority = table.majority_class().unwrap_or("none"),
            classes = catalog.len(),
            "calibration pipeline configured"
        );

        Ok(Self {
            catalog,
            table,
            profile,
        })
    }

    /// HAM10000 catalog and correction table under `profile`.
    pub fn ham10000(profile: CalibrationProfile) -> Result<Self> {
        let catalog = ClassCatalog::ham10000();
        let table = AdjustmentTable::ham10000_v1(&catalog)?;
        Self::new(catalog, table, profile)
    }

    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    pub fn table(&self) -> &AdjustmentTable {
        &self.table
    }

    pub fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }

    pub fn predict(&self, raw: &[f64]) -> Result<Prediction> {
        let scores = ScoreVector::new(raw.to_vec(), &self.catalog)?;
        self.predict_scores(&scores)
    }

    pub fn predict_scores(&self, scores: &ScoreVector) -> Result<Prediction> {
        let mut dist = calibrate(scores, self.profile.temperature)?;
        if self.profile.rebalance {
            dist = rebalance(&dist, &self.table)?;
        }
        let ranked = top_n(&dist, &self.catalog, self.profile.top_n)?;
        let prediction = run_stage4(&Stage4Inputs {
            catalog: &self.catalog,
            profile: &self.profile,
            distribution: &dist,
            ranked: &ranked,
        })?;

        tracing::debug!(
            class = %prediction.class_code,
            confidence = prediction.confidence,
            flags = prediction.flags.len(),
            "prediction calibrated"
        );
        Ok(prediction)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
