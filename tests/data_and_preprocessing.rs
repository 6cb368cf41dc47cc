//! Integration tests for dataset splitting, stratified folds, and the
//! standard scaler.

use tabclf::data_handling::{Dataset, TableMetadata};
use tabclf::math::{Array1, Array2};
use tabclf::preprocessing::StandardScaler;

fn synthetic_dataset(n_negative: usize, n_positive: usize) -> Dataset {
    let n = n_negative + n_positive;
    let mut features = Vec::with_capacity(n * 2);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let label = if i < n_negative { 0 } else { 1 };
        features.push(i as f32);
        features.push(label as f32 * 10.0);
        labels.push(label);
    }
    Dataset::new(
        Array2::from_shape_vec((n, 2), features).unwrap(),
        Array1::from_vec(labels),
        TableMetadata {
            feature_names: vec!["a".to_string(), "b".to_string()],
            label_name: "label".to_string(),
        },
    )
}

// ---------------------------------------------------------------------------
// train_test_split
// ---------------------------------------------------------------------------

#[test]
fn split_sizes_match_the_fraction() {
    let data = synthetic_dataset(50, 50);
    let (train, test) = data.train_test_split(0.2, 42).unwrap();
    assert_eq!(test.n_samples(), 20);
    assert_eq!(train.n_samples(), 80);
}

#[test]
fn split_is_deterministic_for_a_seed() {
    let data = synthetic_dataset(30, 30);
    let (train_a, test_a) = data.train_test_split(0.25, 7).unwrap();
    let (train_b, test_b) = data.train_test_split(0.25, 7).unwrap();
    assert_eq!(train_a.x, train_b.x);
    assert_eq!(test_a.y, test_b.y);
}

#[test]
fn different_seeds_give_different_splits() {
    let data = synthetic_dataset(30, 30);
    let (_, test_a) = data.train_test_split(0.25, 1).unwrap();
    let (_, test_b) = data.train_test_split(0.25, 2).unwrap();
    assert_ne!(test_a.x, test_b.x);
}

#[test]
fn split_partitions_every_row_exactly_once() {
    let data = synthetic_dataset(20, 20);
    let (train, test) = data.train_test_split(0.3, 42).unwrap();

    // First feature is a unique row id in the synthetic data.
    let mut ids: Vec<i64> = train
        .x
        .as_slice()
        .chunks(2)
        .chain(test.x.as_slice().chunks(2))
        .map(|row| row[0] as i64)
        .collect();
    ids.sort_unstable();
    let expected: Vec<i64> = (0..40).collect();
    assert_eq!(ids, expected);
}

#[test]
fn degenerate_fractions_are_rejected() {
    let data = synthetic_dataset(10, 10);
    assert!(data.train_test_split(0.0, 42).is_err());
    assert!(data.train_test_split(1.0, 42).is_err());
    // Rounds to zero test rows.
    assert!(data.train_test_split(0.01, 42).is_err());
}

// ---------------------------------------------------------------------------
// stratified_kfold
// ---------------------------------------------------------------------------

#[test]
fn folds_partition_all_rows() {
    let data = synthetic_dataset(25, 15);
    let folds = data.stratified_kfold(5, 42).unwrap();
    assert_eq!(folds.len(), 5);

    let mut seen = vec![false; data.n_samples()];
    for (train_idx, valid_idx) in &folds {
        assert_eq!(train_idx.len() + valid_idx.len(), data.n_samples());
        for &row in valid_idx {
            assert!(!seen[row], "row {} validated twice", row);
            seen[row] = true;
        }
    }
    assert!(seen.iter().all(|&v| v));
}

#[test]
fn folds_keep_the_class_balance() {
    let data = synthetic_dataset(40, 20);
    let folds = data.stratified_kfold(4, 42).unwrap();
    for (_, valid_idx) in &folds {
        let positives = valid_idx.iter().filter(|&&row| data.y[row] == 1).count();
        assert_eq!(positives, 5);
        assert_eq!(valid_idx.len() - positives, 10);
    }
}

#[test]
fn kfold_rejects_too_few_rows_per_class() {
    let data = synthetic_dataset(10, 3);
    assert!(data.stratified_kfold(5, 42).is_err());
    assert!(data.stratified_kfold(1, 42).is_err());
}

// ---------------------------------------------------------------------------
// StandardScaler
// ---------------------------------------------------------------------------

#[test]
fn scaler_centers_and_scales_each_column() {
    let x = Array2::from_shape_vec((4, 2), vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0])
        .unwrap();
    let (scaler, transformed) = StandardScaler::fit_transform(&x);

    assert!((scaler.mean()[0] - 2.5).abs() < 1e-6);
    assert!((scaler.mean()[1] - 25.0).abs() < 1e-6);

    for c in 0..2 {
        let mean: f32 = (0..4).map(|r| transformed[(r, c)]).sum::<f32>() / 4.0;
        let var: f32 = (0..4).map(|r| transformed[(r, c)].powi(2)).sum::<f32>() / 4.0;
        assert!(mean.abs() < 1e-5);
        assert!((var - 1.0).abs() < 1e-4);
    }
}

#[test]
fn constant_column_does_not_blow_up() {
    let x = Array2::from_shape_vec((3, 2), vec![5.0, 1.0, 5.0, 2.0, 5.0, 3.0]).unwrap();
    let (_, transformed) = StandardScaler::fit_transform(&x);
    for r in 0..3 {
        assert!(transformed[(r, 0)].is_finite());
        assert_eq!(transformed[(r, 0)], 0.0);
    }
}

#[test]
fn transform_reuses_the_fitted_statistics() {
    let train = Array2::from_shape_vec((2, 1), vec![0.0, 2.0]).unwrap();
    let scaler = StandardScaler::fit(&train);
    let test = Array2::from_shape_vec((1, 1), vec![4.0]).unwrap();
    let transformed = scaler.transform(&test);
    // mean 1, std 1 -> (4 - 1) / 1 = 3
    assert!((transformed[(0, 0)] - 3.0).abs() < 1e-6);
}
