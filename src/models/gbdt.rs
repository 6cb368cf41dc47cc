use anyhow::{bail, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;

use crate::config::ModelConfig;
use crate::math::Array2;
use crate::models::classifier_trait::Classifier;

/// Gradient boosting classifier backed by the `gbdt` crate with the
/// `LogLikelyhood` loss, which expects {-1, 1} labels and predicts
/// positive-class probabilities.
pub struct GbdtClassifier {
    model: Option<GBDT>,
    config: ModelConfig,
}

impl GbdtClassifier {
    pub fn new(config: ModelConfig) -> Self {
        GbdtClassifier {
            model: None,
            config,
        }
    }

    fn to_data_vec(x: &Array2<f32>, y: Option<&[i32]>) -> DataVec {
        let mut data = DataVec::with_capacity(x.nrows());
        for row in 0..x.nrows() {
            let features = x.row_slice(row).to_vec();
            // 0/1 labels map to the -1/1 convention of LogLikelyhood
            let label = match y {
                Some(labels) => {
                    if labels[row] == 1 {
                        1.0
                    } else {
                        -1.0
                    }
                }
                None => 0.0,
            };
            data.push(Data::new_training_data(features, 1.0, label, None));
        }
        data
    }
}

impl Classifier for GbdtClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &[i32]) -> Result<()> {
        let ModelConfig::Gbdt {
            learning_rate,
            max_depth,
            num_boost_round,
        } = self.config
        else {
            bail!("Expected gradient boosting params, got {:?}", self.config);
        };

        let mut config = Config::new();
        config.set_feature_size(x.ncols());
        config.set_shrinkage(learning_rate);
        config.set_max_depth(max_depth);
        config.set_iterations(num_boost_round as usize);
        config.set_training_optimization_level(2);
        config.set_loss("LogLikelyhood");

        let mut gbdt = GBDT::new(&config);
        let mut train = Self::to_data_vec(x, Some(y));
        gbdt.fit(&mut train);

        self.model = Some(gbdt);
        Ok(())
    }

    fn predict(&self, x: &Array2<f32>) -> Vec<i32> {
        self.predict_scores(x)
            .iter()
            .map(|&p| if p > 0.5 { 1 } else { 0 })
            .collect()
    }

    fn predict_scores(&self, x: &Array2<f32>) -> Vec<f32> {
        let test = Self::to_data_vec(x, None);
        self.model
            .as_ref()
            .expect("GbdtClassifier used before fit")
            .predict(&test)
    }

    fn name(&self) -> &'static str {
        "Gradient Boosting"
    }
}
