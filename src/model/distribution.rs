use serde::Serialize;

use crate::error::{CalibrationError, Result};
use crate::model::catalog::ClassCatalog;
use crate::numeric::sum_f64;

pub const SUM_TOLERANCE: f64 = 1e-6;

/// Raw per-class model output in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreVector {
    values: Vec<f64>,
}

impl ScoreVector {
    pub fn new(values: Vec<f64>, catalog: &ClassCatalog) -> Result<Self> {
        if values.len() != catalog.len() {
            return Err(CalibrationError::shape(
                "score vector",
                catalog.len(),
                values.len(),
            ));
        }
        if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CalibrationError::invalid(format!(
                "score at index {i} is not finite: {v}"
            )));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Softmax,
    Rebalanced,
}

/// Probabilities in [0, 1] summing to one. Only the calibration stages
/// build these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibratedDistribution {
    probabilities: Vec<f64>,
    provenance: Provenance,
}

impl CalibratedDistribution {
    pub(crate) fn from_normalized(probabilities: Vec<f64>, provenance: Provenance) -> Result<Self> {
        if probabilities.is_empty() {
            return Err(CalibrationError::invalid("distribution is empty"));
        }
        if let Some((i, p)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !(0.0..=1.0).contains(*p))
        {
            return Err(CalibrationError::invalid(format!(
                "probability at index {i} is outside [0, 1]: {p}"
            )));
        }
        let sum = sum_f64(&probabilities);
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(CalibrationError::invalid(format!(
                "probabilities sum to {sum}, expected 1"
            )));
        }
        Ok(Self {
            probabilities,
            provenance,
        })
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.probabilities.get(index).copied()
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub index: usize,
    pub class: String,
    pub probability: f64,
}

/// Highest probability first; equal probabilities keep catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedPrediction {
    entries: Vec<RankedEntry>,
}

impl RankedPrediction {
    pub(crate) fn from_sorted(entries: Vec<RankedEntry>) -> Self {
        debug_assert!(entries.windows(2).all(|w| {
            w[0].probability > w[1].probability
                || (w[0].probability == w[1].probability && w[0].index < w[1].index)
        }));
        Self { entries }
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn first(&self) -> Option<&RankedEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
