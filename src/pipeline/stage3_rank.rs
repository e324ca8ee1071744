use crate::error::{CalibrationError, Result};
use crate::model::catalog::ClassCatalog;
use crate::model::distribution::{CalibratedDistribution, RankedEntry, RankedPrediction};

pub fn top_n(
    dist: &CalibratedDistribution,
    catalog: &ClassCatalog,
    n: usize,
) -> Result<RankedPrediction> {
    if catalog.len() != dist.len() {
        return Err(CalibrationError::shape("class catalog", dist.len(), catalog.len()));
    }
    if n == 0 || n > dist.len() {
        return Err(CalibrationError::invalid(format!(
            "n must be in [1, {}], got {n}",
            dist.len()
        )));
    }

    let probs = dist.probabilities();
    let mut order: Vec<usize> = (0..probs.len()).collect();
    // stable sort keeps ascending index order among equal probabilities
    order.sort_by(|&a, &b| probs[b].total_cmp(&probs[a]));

    let entries = order
        .into_iter()
        .take(n)
        .filter_map(|idx| {
            catalog.get(idx).map(|class| RankedEntry {
                index: idx,
                class: class.code.clone(),
                probability: probs[idx],
            })
        })
        .collect();

    Ok(RankedPrediction::from_sorted(entries))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_rank.rs"]
mod tests;
