//! Exhaustive hyper-parameter grid search with k-fold cross-validation.

use anyhow::{bail, Context, Result};
use rayon::prelude::*;

use crate::config::{search_grid, ModelConfig, ModelFamily};
use crate::data_handling::Dataset;
use crate::metrics::ConfusionMatrix;
use crate::models::build_model;

/// Cross-validated score of a single grid candidate.
#[derive(Debug, Clone)]
pub struct CandidateScore {
    pub config: ModelConfig,
    pub fold_accuracies: Vec<f32>,
    pub mean_accuracy: f32,
}

/// Result of scoring one family's full grid.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: CandidateScore,
    pub candidates: Vec<CandidateScore>,
}

/// Grid search driver: every candidate is scored by mean validation
/// accuracy over the same stratified folds. Candidates are independent,
/// so they are scored in parallel.
#[derive(Debug, Clone, Copy)]
pub struct GridSearch {
    pub n_folds: usize,
    pub seed: u64,
}

impl GridSearch {
    pub fn new(n_folds: usize, seed: u64) -> Self {
        GridSearch { n_folds, seed }
    }

    pub fn run(&self, family: ModelFamily, data: &Dataset) -> Result<SearchOutcome> {
        let grid = search_grid(family, self.seed);
        if grid.is_empty() {
            bail!("empty search grid for {}", family);
        }

        let folds = data
            .stratified_kfold(self.n_folds, self.seed)
            .with_context(|| format!("building CV folds for {}", family))?;

        let candidates: Vec<CandidateScore> = grid
            .into_par_iter()
            .map(|config| score_candidate(config, data, &folds))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "{}: scored {} grid candidates over {} folds",
            family,
            candidates.len(),
            self.n_folds
        );

        let best = select_best(&candidates);
        Ok(SearchOutcome {
            best,
            candidates,
        })
    }
}

/// Highest mean accuracy wins; the earliest candidate wins ties, so the
/// outcome is deterministic for a fixed grid order.
pub fn select_best(candidates: &[CandidateScore]) -> CandidateScore {
    assert!(!candidates.is_empty(), "select_best on empty candidates");
    let mut best = &candidates[0];
    for candidate in &candidates[1..] {
        if candidate.mean_accuracy > best.mean_accuracy {
            best = candidate;
        }
    }
    best.clone()
}

fn score_candidate(
    config: ModelConfig,
    data: &Dataset,
    folds: &[(Vec<usize>, Vec<usize>)],
) -> Result<CandidateScore> {
    let mut fold_accuracies = Vec::with_capacity(folds.len());

    for (fold, (train_idx, valid_idx)) in folds.iter().enumerate() {
        let train = data.select(train_idx);
        let valid = data.select(valid_idx);

        let mut model = build_model(&config);
        model.fit(&train.x, &train.y.to_vec()).with_context(|| {
            format!(
                "fitting {} ({}) on CV fold {}",
                config.family(),
                config.describe(),
                fold
            )
        })?;

        let preds = model.predict(&valid.x);
        let cm = ConfusionMatrix::from_predictions(&valid.y.to_vec(), &preds)?;
        fold_accuracies.push(cm.accuracy());
    }

    let mean_accuracy = fold_accuracies.iter().sum::<f32>() / fold_accuracies.len() as f32;
    log::trace!(
        "{} [{}]: CV accuracy {:.4}",
        config.family(),
        config.describe(),
        mean_accuracy
    );

    Ok(CandidateScore {
        config,
        fold_accuracies,
        mean_accuracy,
    })
}
