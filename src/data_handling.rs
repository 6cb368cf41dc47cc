//! Data structures and helpers for labeled tabular datasets.
//!
//! This module defines `Dataset` and contains the seeded train/test split
//! and the stratified k-fold assignment used by the grid search.
use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::math::{Array1, Array2};

/// Column names carried alongside the numeric arrays.
#[derive(Debug, Clone)]
pub struct TableMetadata {
    pub feature_names: Vec<String>,
    pub label_name: String,
}

/// A labeled feature table. Labels use the crate convention 1 for the
/// positive class and 0 for the negative class.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f32>,
    pub y: Array1<i32>,
    pub metadata: TableMetadata,
}

impl Dataset {
    pub fn new(x: Array2<f32>, y: Array1<i32>, metadata: TableMetadata) -> Self {
        assert_eq!(
            x.nrows(),
            y.len(),
            "feature matrix and labels must have the same number of rows"
        );
        Dataset { x, y, metadata }
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// (negatives, positives)
    pub fn class_counts(&self) -> (usize, usize) {
        let positives = self.y.iter().filter(|&&v| v == 1).count();
        (self.y.len() - positives, positives)
    }

    pub fn log_input_summary(&self) {
        let (negatives, positives) = self.class_counts();
        log::info!(
            "Input data: {} rows, {} feature columns, {} positive / {} negative labels",
            self.n_samples(),
            self.n_features(),
            positives,
            negatives
        );
    }

    /// Build a new dataset from a subset of row indices.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            x: self.x.select_rows(indices),
            y: self.y.select(indices),
            metadata: self.metadata.clone(),
        }
    }

    /// Deterministic shuffled train/test split.
    ///
    /// Rows are shuffled with a seeded RNG and the trailing
    /// `test_fraction` share becomes the test set.
    pub fn train_test_split(&self, test_fraction: f32, seed: u64) -> Result<(Dataset, Dataset)> {
        if !(0.0..1.0).contains(&test_fraction) || test_fraction == 0.0 {
            bail!("test_fraction must be in (0, 1), got {}", test_fraction);
        }

        let n_samples = self.n_samples();
        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let n_test = ((n_samples as f32) * test_fraction).round() as usize;
        if n_test == 0 || n_test == n_samples {
            bail!(
                "test_fraction {} leaves an empty partition for {} rows",
                test_fraction,
                n_samples
            );
        }

        let (test_idx, train_idx) = indices.split_at(n_test);
        Ok((self.select(train_idx), self.select(test_idx)))
    }

    /// Stratified k-fold assignment for cross-validation.
    ///
    /// Rows of each class are shuffled independently and dealt round-robin
    /// across folds, so every fold keeps roughly the input class balance.
    /// Returns `(train_indices, validation_indices)` per fold; each row
    /// appears in exactly one validation fold.
    pub fn stratified_kfold(&self, k: usize, seed: u64) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if k < 2 {
            bail!("cross-validation requires at least 2 folds, got {}", k);
        }
        let (negatives, positives) = self.class_counts();
        if positives < k || negatives < k {
            bail!(
                "each class needs at least {} rows for {}-fold CV ({} positive, {} negative)",
                k,
                k,
                positives,
                negatives
            );
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut fold_of = vec![0usize; self.n_samples()];

        for class in [0, 1] {
            let mut rows: Vec<usize> = (0..self.n_samples())
                .filter(|&i| self.y[i] == class)
                .collect();
            rows.shuffle(&mut rng);
            for (pos, &row) in rows.iter().enumerate() {
                fold_of[row] = pos % k;
            }
        }

        let folds = (0..k)
            .map(|fold| {
                let mut train = Vec::new();
                let mut valid = Vec::new();
                for (row, &assigned) in fold_of.iter().enumerate() {
                    if assigned == fold {
                        valid.push(row);
                    } else {
                        train.push(row);
                    }
                }
                (train, valid)
            })
            .collect();

        Ok(folds)
    }
}
