use crate::error::{CalibrationError, Result};
use crate::model::adjustment::AdjustmentTable;
use crate::model::distribution::{CalibratedDistribution, Provenance};
use crate::numeric::sum_f64;

/// Multiplies each class probability by its table multiplier, caps each
/// value at 1.0 and renormalizes.
///
/// The correction is meant to be applied exactly once. Feeding an already
/// rebalanced distribution back in compounds it; the call still completes
/// but logs a warning.
pub fn rebalance(
    dist: &CalibratedDistribution,
    table: &AdjustmentTable,
) -> Result<CalibratedDistribution> {
    if table.len() != dist.len() {
        return Err(CalibrationError::shape(
            "adjustment table",
            dist.len(),
            table.len(),
        ));
    }
    if dist.provenance() == Provenance::Rebalanced {
        tracing::warn!("rebalance applied to an already rebalanced distribution; correction compounds");
    }

    let mut adjusted = Vec::with_capacity(dist.len());
    for (entry, &p) in table.entries().iter().zip(dist.probabilities()) {
        adjusted.push((p * entry.multiplier).min(1.0));
    }

    let probabilities = renormalize(adjusted)?;
    CalibratedDistribution::from_normalized(probabilities, Provenance::Rebalanced)
}

fn renormalize(adjusted: Vec<f64>) -> Result<Vec<f64>> {
    let sum = sum_f64(&adjusted);
    if !(sum.is_finite() && sum > 0.0) {
        return Err(CalibrationError::DegenerateDistribution { sum });
    }
    Ok(adjusted.into_iter().map(|a| a / sum).collect())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_rebalance.rs"]
mod tests;
