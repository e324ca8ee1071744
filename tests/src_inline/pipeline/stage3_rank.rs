use super::*;
use crate::model::distribution::{Provenance, ScoreVector};
use crate::numeric::argmax;
use crate::pipeline::stage1_calibrate::calibrate;

fn dist(values: Vec<f64>) -> CalibratedDistribution {
    CalibratedDistribution::from_normalized(values, Provenance::Softmax).unwrap()
}

#[test]
fn test_top3_starts_with_argmax() {
    let catalog = ClassCatalog::ham10000();
    let raw = ScoreVector::new(vec![2.0, 1.0, 0.0, 0.0, 3.0, 5.0, 0.0], &catalog).unwrap();
    let d = calibrate(&raw, 1.0).unwrap();
    let ranked = top_n(&d, &catalog, 3).unwrap();
    assert_eq!(ranked.len(), 3);
    let first = ranked.first().unwrap();
    assert_eq!(Some(first.index), argmax(d.probabilities()));
    assert_eq!(first.class, "nv");
    let classes: Vec<&str> = ranked.entries().iter().map(|e| e.class.as_str()).collect();
    assert_eq!(classes, vec!["nv", "mel", "akiec"]);
}

#[test]
fn test_ties_prefer_lower_index() {
    let catalog = ClassCatalog::ham10000();
    let d = dist(vec![0.1, 0.2, 0.1, 0.2, 0.1, 0.2, 0.1]);
    let ranked = top_n(&d, &catalog, 7).unwrap();
    let order: Vec<usize> = ranked.entries().iter().map(|e| e.index).collect();
    assert_eq!(order, vec![1, 3, 5, 0, 2, 4, 6]);
}

#[test]
fn test_full_ranking_is_sorted_permutation() {
    let catalog = ClassCatalog::ham10000();
    let values = vec![0.05, 0.3, 0.02, 0.13, 0.25, 0.15, 0.1];
    let d = dist(values.clone());
    let ranked = top_n(&d, &catalog, 7).unwrap();

    let mut indices: Vec<usize> = ranked.entries().iter().map(|e| e.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, (0..7).collect::<Vec<_>>());

    let probs: Vec<f64> = ranked.entries().iter().map(|e| e.probability).collect();
    assert!(probs.windows(2).all(|w| w[0] >= w[1]));
    let mut expected = values;
    expected.sort_by(|a, b| b.total_cmp(a));
    assert_eq!(probs, expected);
}

#[test]
fn test_exact_length_and_input_untouched() {
    let catalog = ClassCatalog::ham10000();
    let d = dist(vec![0.05, 0.3, 0.02, 0.13, 0.25, 0.15, 0.1]);
    let snapshot = d.clone();
    for n in 1..=7 {
        assert_eq!(top_n(&d, &catalog, n).unwrap().len(), n);
    }
    assert_eq!(d, snapshot);
}

#[test]
fn test_n_out_of_range() {
    let catalog = ClassCatalog::ham10000();
    let d = dist(vec![1.0 / 7.0; 7]);
    for n in [0, 8, 100] {
        assert!(matches!(
            top_n(&d, &catalog, n),
            Err(CalibrationError::InvalidParameter(_))
        ));
    }
}

#[test]
fn test_catalog_mismatch() {
    let catalog = ClassCatalog::ham10000();
    let d = dist(vec![0.5, 0.5]);
    assert!(matches!(
        top_n(&d, &catalog, 1),
        Err(CalibrationError::ShapeMismatch { .. })
    ));
}
