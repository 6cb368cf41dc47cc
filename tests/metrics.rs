//! Integration tests for the confusion matrix and ROC estimation.

use tabclf::error::MetricsError;
use tabclf::math::Array1;
use tabclf::metrics::{roc_auc, roc_auc_score, roc_curve, ConfusionMatrix};

// ---------------------------------------------------------------------------
// ConfusionMatrix
// ---------------------------------------------------------------------------

fn example_matrix() -> ConfusionMatrix {
    // 3 TN, 1 FP, 2 FN, 4 TP
    let y_true = vec![0, 0, 0, 0, 1, 1, 1, 1, 1, 1];
    let y_pred = vec![0, 0, 0, 1, 0, 0, 1, 1, 1, 1];
    ConfusionMatrix::from_predictions(&y_true, &y_pred).unwrap()
}

#[test]
fn confusion_counts_match_hand_tally() {
    let cm = example_matrix();
    assert_eq!(cm.tn, 3);
    assert_eq!(cm.fp, 1);
    assert_eq!(cm.fn_, 2);
    assert_eq!(cm.tp, 4);
    assert_eq!(cm.total(), 10);
}

#[test]
fn scalar_metrics_match_definitions() {
    let cm = example_matrix();
    assert!((cm.accuracy() - 0.7).abs() < 1e-6);
    assert!((cm.precision() - 4.0 / 5.0).abs() < 1e-6);
    assert!((cm.sensitivity() - 4.0 / 6.0).abs() < 1e-6);
    assert!((cm.specificity() - 3.0 / 4.0).abs() < 1e-6);
}

#[test]
fn weighted_f1_is_support_weighted() {
    let cm = example_matrix();
    let f1_pos = 2.0 * 4.0 / (2.0 * 4.0 + 1.0 + 2.0);
    let f1_neg = 2.0 * 3.0 / (2.0 * 3.0 + 2.0 + 1.0);
    let expected = (f1_pos * 6.0 + f1_neg * 4.0) / 10.0;
    assert!((cm.weighted_f1() - expected).abs() < 1e-6);
}

#[test]
fn mcc_is_one_for_perfect_predictions() {
    let y = vec![0, 1, 0, 1, 1];
    let cm = ConfusionMatrix::from_predictions(&y, &y).unwrap();
    assert!((cm.mcc() - 1.0).abs() < 1e-6);
}

#[test]
fn mcc_is_zero_when_a_marginal_is_empty() {
    // All predictions positive: the (tn + fn) marginal is empty.
    let cm = ConfusionMatrix::from_predictions(&[0, 1, 1], &[1, 1, 1]).unwrap();
    assert_eq!(cm.mcc(), 0.0);
}

#[test]
fn mismatched_lengths_are_rejected() {
    let result = ConfusionMatrix::from_predictions(&[0, 1], &[0]);
    assert!(matches!(result, Err(MetricsError::LengthMismatch)));
}

// ---------------------------------------------------------------------------
// roc_curve / roc_auc
// ---------------------------------------------------------------------------

#[test]
fn perfectly_separated_scores_give_auc_one() {
    let scores = Array1::from_vec(vec![0.9, 0.8, 0.2, 0.1]);
    let labels = Array1::from_vec(vec![1, 1, 0, 0]);
    let auc = roc_auc_score(&scores, &labels).unwrap();
    assert!((auc - 1.0).abs() < 1e-6);
}

#[test]
fn reversed_scores_give_auc_zero() {
    let scores = Array1::from_vec(vec![0.1, 0.2, 0.8, 0.9]);
    let labels = Array1::from_vec(vec![1, 1, 0, 0]);
    let auc = roc_auc_score(&scores, &labels).unwrap();
    assert!(auc.abs() < 1e-6);
}

#[test]
fn known_interleaved_example_matches_hand_computed_auc() {
    // Ranking from the top: 1, 0, 1, 0 -> AUC = 0.75
    let scores = Array1::from_vec(vec![0.9, 0.7, 0.6, 0.3]);
    let labels = Array1::from_vec(vec![1, 0, 1, 0]);
    let auc = roc_auc_score(&scores, &labels).unwrap();
    assert!((auc - 0.75).abs() < 1e-6);
}

#[test]
fn curve_is_anchored_and_monotone() {
    let scores = Array1::from_vec(vec![0.9, 0.7, 0.6, 0.3, 0.2]);
    let labels = Array1::from_vec(vec![1, 0, 1, 1, 0]);
    let curve = roc_curve(&scores, &labels).unwrap();

    assert_eq!(curve.fpr[0], 0.0);
    assert_eq!(curve.tpr[0], 0.0);
    assert_eq!(curve.thresholds[0], f32::INFINITY);
    assert_eq!(*curve.fpr.last().unwrap(), 1.0);
    assert_eq!(*curve.tpr.last().unwrap(), 1.0);

    for i in 1..curve.fpr.len() {
        assert!(curve.fpr[i] >= curve.fpr[i - 1]);
        assert!(curve.tpr[i] >= curve.tpr[i - 1]);
        assert!(curve.thresholds[i] <= curve.thresholds[i - 1]);
    }
}

#[test]
fn tied_scores_collapse_to_one_point() {
    let scores = Array1::from_vec(vec![0.5, 0.5, 0.5, 0.5]);
    let labels = Array1::from_vec(vec![1, 0, 1, 0]);
    let curve = roc_curve(&scores, &labels).unwrap();

    // Only the (0, 0) anchor and a single point for the tied block.
    assert_eq!(curve.fpr.len(), 2);
    assert!((roc_auc(&curve) - 0.5).abs() < 1e-6);
}

#[test]
fn nan_scores_are_rejected_with_a_count() {
    let scores = Array1::from_vec(vec![0.9, f32::NAN, f32::NAN, 0.3]);
    let labels = Array1::from_vec(vec![1, 0, 1, 0]);
    let result = roc_curve(&scores, &labels);
    assert!(matches!(result, Err(MetricsError::NaNFound(2))));
}

#[test]
fn single_class_labels_are_rejected() {
    let scores = Array1::from_vec(vec![0.9, 0.5, 0.3]);
    let labels = Array1::from_vec(vec![1, 1, 1]);
    let result = roc_curve(&scores, &labels);
    assert!(matches!(result, Err(MetricsError::SingleClass)));
}

#[test]
fn mismatched_score_and_label_lengths_are_rejected() {
    let scores = Array1::from_vec(vec![0.9, 0.5]);
    let labels = Array1::from_vec(vec![1, 0, 1]);
    let result = roc_curve(&scores, &labels);
    assert!(matches!(result, Err(MetricsError::LengthMismatch)));
}
