use serde::Serialize;
use serde::ser::Serializer;

use crate::error::{CalibrationError, Result};
use crate::model::catalog::{ClassCatalog, RiskLevel};
use crate::model::distribution::{CalibratedDistribution, Provenance, RankedPrediction};
use crate::model::flags::{Flag, flag_order};
use crate::model::profile::CalibrationProfile;
use crate::numeric::{argmax, normalized_entropy};

/// Label → percentage, serialized as a JSON object in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledProbabilities(pub Vec<(String, f64)>);

impl Serialize for LabeledProbabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub predicted_class: usize,
    pub class_code: String,
    pub label: String,
    pub confidence: f64,
    pub probabilities: LabeledProbabilities,
    pub top: RankedPrediction,
    pub risk_level: RiskLevel,
    pub recommended_action: String,
    pub flags: Vec<Flag>,
    pub temperature: f64,
    pub rebalanced: bool,
    #[serde(skip)]
    pub distribution: CalibratedDistribution,
}

#[derive(Debug, Clone)]
pub struct Stage4Inputs<'a> {
    pub catalog: &'a ClassCatalog,
    pub profile: &'a CalibrationProfile,
    pub distribution: &'a CalibratedDistribution,
    pub ranked: &'a RankedPrediction,
}

pub fn run_stage4(inputs: &Stage4Inputs<'_>) -> Result<Prediction> {
    let probs = inputs.distribution.probabilities();
    let best = inputs
        .ranked
        .first()
        .map(|e| e.index)
        .or_else(|| argmax(probs))
        .ok_or_else(|| CalibrationError::invalid("empty ranking"))?;
    let class = inputs
        .catalog
        .get(best)
        .ok_or_else(|| CalibrationError::shape("class catalog", probs.len(), inputs.catalog.len()))?;

    let probabilities = inputs
        .catalog
        .iter()
        .zip(probs)
        .map(|(c, &p)| (c.label.clone(), percent(p)))
        .collect();

    let flags = collect_flags(inputs, best, class.risk);

    Ok(Prediction {
        predicted_class: best,
        class_code: class.code.clone(),
        label: class.label.clone(),
        confidence: percent(probs[best]),
        probabilities: LabeledProbabilities(probabilities),
        top: inputs.ranked.clone(),
        risk_level: class.risk,
        recommended_action: class.action.clone(),
        flags,
        temperature: inputs.profile.temperature,
        rebalanced: inputs.distribution.provenance() == Provenance::Rebalanced,
        distribution: inputs.distribution.clone(),
    })
}

fn collect_flags(inputs: &Stage4Inputs<'_>, best: usize, risk: RiskLevel) -> Vec<Flag> {
    let mut flags = Vec::new();
    let probs = inputs.distribution.probabilities();
    let top = probs[best];

    if top < inputs.profile.confidence_low {
        flags.push(Flag::LowConfidence);
    }
    if normalized_entropy(probs) > inputs.profile.entropy_high {
        flags.push(Flag::HighEntropy);
    }
    let runner_up = probs
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != best)
        .map(|(_, &p)| p)
        .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.max(p))));
    if let Some(second) = runner_up {
        if top - second < inputs.profile.margin_low {
            flags.push(Flag::NarrowMargin);
        }
    }
    if risk.is_elevated() {
        flags.push(Flag::HighRiskClass);
    }
    if inputs.distribution.provenance() == Provenance::Rebalanced {
        flags.push(Flag::Rebalanced);
    }

    // stable ordering
    let mut ordered = Vec::new();
    for flag in flag_order() {
        if flags.contains(flag) {
            ordered.push(*flag);
        }
    }
    ordered
}

/// Probability as a percentage rounded to two decimals.
pub fn percent(p: f64) -> f64 {
    (p * 10_000.0).round() / 100.0
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_classify.rs"]
mod tests;
