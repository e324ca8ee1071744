use super::*;
use crate::model::catalog::ClassCatalog;
use crate::model::distribution::ScoreVector;
use crate::pipeline::stage1_calibrate::calibrate;

const NV: usize = 5;

fn ham_table() -> AdjustmentTable {
    AdjustmentTable::ham10000_v1(&ClassCatalog::ham10000()).unwrap()
}

fn softmax_of(values: &[f64]) -> CalibratedDistribution {
    let raw = ScoreVector::new(values.to_vec(), &ClassCatalog::ham10000()).unwrap();
    calibrate(&raw, 1.0).unwrap()
}

fn sum(dist: &CalibratedDistribution) -> f64 {
    dist.probabilities().iter().sum()
}

#[test]
fn test_majority_suppression_scenario() {
    let before = softmax_of(&[2.0, 1.0, 0.0, 0.0, 3.0, 5.0, 0.0]);
    let after = rebalance(&before, &ham_table()).unwrap();

    assert!((sum(&after) - 1.0).abs() <= 1e-6);
    assert!(after.probabilities().iter().all(|p| (0.0..=1.0).contains(p)));
    assert_eq!(after.provenance(), Provenance::Rebalanced);

    let nv_before = before.probabilities()[NV];
    let nv_after = after.probabilities()[NV];
    assert!(nv_before > 0.8);
    assert!(nv_after < nv_before * 0.2, "nv share {nv_before} -> {nv_after}");
    // melanoma takes over once nv is suppressed
    let top = crate::numeric::argmax(after.probabilities()).unwrap();
    assert_eq!(top, 4);
}

#[test]
fn test_output_sums_to_one_for_varied_inputs() {
    let cases: [[f64; 7]; 4] = [
        [0.0; 7],
        [9.0, -2.0, 0.5, 0.0, 1.0, 2.0, -7.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 30.0, 0.0],
        [0.3, 0.3, 0.3, 8.0, 0.3, 0.3, 8.0],
    ];
    for case in cases {
        let after = rebalance(&softmax_of(&case), &ham_table()).unwrap();
        assert!((sum(&after) - 1.0).abs() <= 1e-6);
    }
}

#[test]
fn test_boost_is_capped_at_full_mass() {
    let dist = CalibratedDistribution::from_normalized(
        vec![0.5, 0.1, 0.1, 0.1, 0.1, 0.1, 0.0],
        Provenance::Softmax,
    )
    .unwrap();
    let after = rebalance(&dist, &ham_table()).unwrap();
    // akiec: 0.5 * 10 and df: 0.1 * 10 both cap at 1.0 before renormalization
    let p = after.probabilities();
    assert!((p[0] - p[3]).abs() < 1e-12);
    assert!((p[0] - 1.0 / 3.51).abs() < 1e-9);
}

#[test]
fn test_monotone_in_single_multiplier() {
    let dists = [
        softmax_of(&[2.0, 1.0, 0.0, 0.0, 3.0, 5.0, 0.0]),
        softmax_of(&[0.0, 6.0, 0.0, 0.0, 1.0, 2.0, 0.0]),
        softmax_of(&[0.0; 7]),
    ];
    let base = ham_table();
    for dist in &dists {
        for (idx, class) in ["bcc", "mel", "vasc"].into_iter().enumerate() {
            let class_idx = [1usize, 4, 6][idx];
            let mut last = 0.0;
            for m in [1.0, 2.0, 5.0, 10.0, 50.0, 1000.0] {
                let table = base.with_multiplier(class, m).unwrap();
                let share = rebalance(dist, &table).unwrap().probabilities()[class_idx];
                assert!(share + 1e-12 >= last, "{class} share dropped at x{m}");
                last = share;
            }
        }
    }
}

#[test]
fn test_neutral_table_preserves_distribution() {
    let dist = softmax_of(&[2.0, 1.0, 0.0, 0.0, 3.0, 5.0, 0.0]);
    let table = AdjustmentTable::neutral(&ClassCatalog::ham10000());
    let after = rebalance(&dist, &table).unwrap();
    for (a, b) in after.probabilities().iter().zip(dist.probabilities()) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn test_double_application_is_not_idempotent() {
    let dist = softmax_of(&[2.0, 1.0, 0.0, 0.0, 3.0, 5.0, 0.0]);
    let once = rebalance(&dist, &ham_table()).unwrap();
    // misuse: the second pass compounds the correction
    let twice = rebalance(&once, &ham_table()).unwrap();
    assert_ne!(once.probabilities(), twice.probabilities());
    assert!(twice.probabilities()[NV] < once.probabilities()[NV]);
    assert!((sum(&twice) - 1.0).abs() <= 1e-6);
}

#[test]
fn test_single_application_is_deterministic() {
    let dist = softmax_of(&[2.0, 1.0, 0.0, 0.0, 3.0, 5.0, 0.0]);
    let a = rebalance(&dist, &ham_table()).unwrap();
    let b = rebalance(&dist, &ham_table()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_length_mismatch() {
    let dist = CalibratedDistribution::from_normalized(vec![0.25; 4], Provenance::Softmax).unwrap();
    let err = rebalance(&dist, &ham_table()).unwrap_err();
    assert_eq!(
        err,
        CalibrationError::ShapeMismatch {
            what: "adjustment table",
            expected: 4,
            actual: 7,
        }
    );
}

#[test]
fn test_zero_mass_is_degenerate() {
    let err = renormalize(vec![0.0; 7]).unwrap_err();
    assert!(matches!(err, CalibrationError::DegenerateDistribution { .. }));
}
