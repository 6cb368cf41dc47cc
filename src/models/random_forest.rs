use anyhow::{bail, Context, Result};
use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_trees::DecisionTree;
use ndarray::Axis;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::config::ModelConfig;
use crate::math::Array2;
use crate::models::classifier_trait::Classifier;
use crate::models::utils::to_ndarray_f64;

/// Random forest built as bootstrap-aggregated `linfa-trees` decision
/// trees. Tree training itself is fully delegated; this wrapper only
/// draws the bootstrap samples and averages votes.
pub struct RandomForestClassifier {
    trees: Vec<DecisionTree<f64, usize>>,
    config: ModelConfig,
}

impl RandomForestClassifier {
    pub fn new(config: ModelConfig) -> Self {
        RandomForestClassifier {
            trees: Vec::new(),
            config,
        }
    }

    /// Fraction of trees voting for the positive class, per row.
    fn vote_fraction(&self, x: &Array2<f32>) -> Vec<f32> {
        assert!(
            !self.trees.is_empty(),
            "RandomForestClassifier used before fit"
        );
        let records = to_ndarray_f64(x);
        let mut votes = vec![0usize; x.nrows()];
        for tree in &self.trees {
            let preds: ndarray::Array1<usize> = tree.predict(&records);
            for (count, &pred) in votes.iter_mut().zip(preds.iter()) {
                *count += pred;
            }
        }
        let n_trees = self.trees.len() as f32;
        votes.iter().map(|&v| v as f32 / n_trees).collect()
    }
}

impl Classifier for RandomForestClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &[i32]) -> Result<()> {
        let ModelConfig::RandomForest {
            n_trees,
            max_depth,
            seed,
        } = self.config
        else {
            bail!("Expected random forest params, got {:?}", self.config);
        };

        let records = to_ndarray_f64(x);
        let targets =
            ndarray::Array1::from(y.iter().map(|&l| l as usize).collect::<Vec<usize>>());
        let n_samples = records.nrows();

        let mut rng = StdRng::seed_from_u64(seed);
        let mut trees = Vec::with_capacity(n_trees);

        for _ in 0..n_trees {
            let sample: Vec<usize> = (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
            let boot_records = records.select(Axis(0), &sample);
            let boot_targets = targets.select(Axis(0), &sample);
            let dataset = Dataset::new(boot_records, boot_targets);

            let tree = DecisionTree::params()
                .max_depth(max_depth)
                .fit(&dataset)
                .context("decision tree training failed")?;
            trees.push(tree);
        }

        self.trees = trees;
        Ok(())
    }

    fn predict(&self, x: &Array2<f32>) -> Vec<i32> {
        self.vote_fraction(x)
            .iter()
            .map(|&p| if p >= 0.5 { 1 } else { 0 })
            .collect()
    }

    fn predict_scores(&self, x: &Array2<f32>) -> Vec<f32> {
        self.vote_fraction(x)
    }

    fn name(&self) -> &'static str {
        "Random Forest"
    }
}
