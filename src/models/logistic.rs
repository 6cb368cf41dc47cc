use anyhow::{bail, Context, Result};
use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};

use crate::config::ModelConfig;
use crate::math::Array2;
use crate::models::classifier_trait::Classifier;
use crate::models::utils::{labels_to_ndarray, to_ndarray_f64};

/// L2-regularized logistic regression backed by `linfa-logistic`.
pub struct LogisticClassifier {
    model: Option<FittedLogisticRegression<f64, i32>>,
    config: ModelConfig,
}

impl LogisticClassifier {
    pub fn new(config: ModelConfig) -> Self {
        LogisticClassifier {
            model: None,
            config,
        }
    }

    fn fitted(&self) -> &FittedLogisticRegression<f64, i32> {
        self.model
            .as_ref()
            .expect("LogisticClassifier used before fit")
    }
}

impl Classifier for LogisticClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &[i32]) -> Result<()> {
        let ModelConfig::Logistic {
            alpha,
            max_iterations,
        } = self.config
        else {
            bail!(
                "Expected logistic regression params, got {:?}",
                self.config
            );
        };

        let records = to_ndarray_f64(x);
        let targets = labels_to_ndarray(y);
        let dataset = Dataset::new(records, targets);

        let model = LogisticRegression::default()
            .alpha(alpha)
            .max_iterations(max_iterations)
            .fit(&dataset)
            .context("logistic regression training failed")?;

        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, x: &Array2<f32>) -> Vec<i32> {
        let records = to_ndarray_f64(x);
        let predictions: ndarray::Array1<i32> = self.fitted().predict(&records);
        predictions.to_vec()
    }

    fn predict_scores(&self, x: &Array2<f32>) -> Vec<f32> {
        let records = to_ndarray_f64(x);
        let fitted = self.fitted();
        // predict_probabilities reports the probability of whichever
        // class the solver saw first in the training targets; flip when
        // that class is 0 so scores are always P(class 1).
        let positive_is_one = fitted.labels().pos.class == 1;
        fitted
            .predict_probabilities(&records)
            .iter()
            .map(|&p| {
                if positive_is_one {
                    p as f32
                } else {
                    1.0 - p as f32
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "Logistic Regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelFamily;
    use crate::math::Array2;

    #[test]
    fn logistic_separates_shifted_clusters() {
        // Two clusters along the first feature, second feature is noise
        let x = Array2::from_shape_vec(
            (10, 2),
            vec![
                -2.0, 0.1, -1.8, -0.2, -2.2, 0.3, -1.9, 0.0, -2.1, -0.1, 2.0, 0.2, 1.8, -0.3, 2.2,
                0.1, 1.9, -0.2, 2.1, 0.0,
            ],
        )
        .unwrap();
        let y = vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1];

        let mut clf = LogisticClassifier::new(ModelConfig::default_for(ModelFamily::Logistic));
        clf.fit(&x, &y).unwrap();

        let preds = clf.predict(&x);
        assert_eq!(preds, y);

        let scores = clf.predict_scores(&x);
        for (score, label) in scores.iter().zip(y.iter()) {
            assert!(*score >= 0.0 && *score <= 1.0);
            if *label == 1 {
                assert!(*score > 0.5, "positive sample scored {}", score);
            } else {
                assert!(*score < 0.5, "negative sample scored {}", score);
            }
        }
    }

    #[test]
    fn logistic_scores_point_toward_class_one_for_either_row_order() {
        // The probability direction must not depend on which class the
        // solver sees first in the training targets.
        let feature = [-2.0f32, -1.8, -2.2, -1.9, -2.1, 2.0, 1.8, 2.2, 1.9, 2.1];
        let labels = [0, 0, 0, 0, 0, 1, 1, 1, 1, 1];

        for reversed in [false, true] {
            let mut order: Vec<usize> = (0..feature.len()).collect();
            if reversed {
                order.reverse();
            }
            let x = Array2::from_shape_vec(
                (feature.len(), 1),
                order.iter().map(|&i| feature[i]).collect(),
            )
            .unwrap();
            let y: Vec<i32> = order.iter().map(|&i| labels[i]).collect();

            let mut clf =
                LogisticClassifier::new(ModelConfig::default_for(ModelFamily::Logistic));
            clf.fit(&x, &y).unwrap();

            let scores = crate::math::Array1::from_vec(clf.predict_scores(&x));
            let auc =
                crate::metrics::roc_auc_score(&scores, &crate::math::Array1::from_vec(y)).unwrap();
            assert!(
                (auc - 1.0).abs() < 1e-6,
                "AUC {} on separable data (reversed = {})",
                auc,
                reversed
            );
        }
    }

    #[test]
    fn logistic_rejects_foreign_config() {
        let mut clf = LogisticClassifier::new(ModelConfig::default_for(ModelFamily::Gbdt));
        let x = Array2::from_shape_vec((2, 1), vec![0.0, 1.0]).unwrap();
        assert!(clf.fit(&x, &[0, 1]).is_err());
    }
}
