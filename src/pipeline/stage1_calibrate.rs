use crate::error::{CalibrationError, Result};
use crate::model::distribution::{CalibratedDistribution, Provenance, ScoreVector};
use crate::numeric::{max_f64, sum_f64};

/// Temperature-scaled softmax. `temperature < 1` sharpens the distribution
/// around the argmax, `temperature > 1` flattens it.
pub fn calibrate(raw: &ScoreVector, temperature: f64) -> Result<CalibratedDistribution> {
    if !temperature.is_finite() || temperature <= 0.0 {
        return Err(CalibrationError::invalid(format!(
            "temperature must be positive and finite, got {temperature}"
        )));
    }

    // shift by the raw max before scaling: every exponent is <= 0, so finite
    // scores never overflow whatever the temperature
    let values = raw.values();
    let max = max_f64(values);
    let exps: Vec<f64> = values
        .iter()
        .map(|&v| ((v - max) / temperature).exp())
        .collect();
    let total = sum_f64(&exps);

    let probabilities = exps.iter().map(|&e| e / total).collect();
    CalibratedDistribution::from_normalized(probabilities, Provenance::Softmax)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_calibrate.rs"]
mod tests;
