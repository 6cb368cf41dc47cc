use anyhow::{bail, Context, Result};
use linfa::dataset::Pr;
use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_svm::Svm;

use crate::config::ModelConfig;
use crate::math::Array2;
use crate::models::classifier_trait::Classifier;
use crate::models::utils::to_ndarray_f64;

/// Linear support-vector machine backed by `linfa-svm`.
///
/// The underlying solver only produces margin-derived scores, not
/// calibrated probabilities, so `predict_proba` returns `None` and
/// consumers fall back to `predict_scores`.
pub struct SvmClassifier {
    model: Option<Svm<f64, Pr>>,
    config: ModelConfig,
}

impl SvmClassifier {
    pub fn new(config: ModelConfig) -> Self {
        SvmClassifier {
            model: None,
            config,
        }
    }

    fn fitted(&self) -> &Svm<f64, Pr> {
        self.model.as_ref().expect("SvmClassifier used before fit")
    }
}

impl Classifier for SvmClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &[i32]) -> Result<()> {
        let ModelConfig::LinearSvm { c, eps } = self.config else {
            bail!("Expected linear SVM params, got {:?}", self.config);
        };

        let records = to_ndarray_f64(x);
        let targets = ndarray::Array1::from(y.iter().map(|&l| l == 1).collect::<Vec<bool>>());
        let dataset = Dataset::new(records, targets);

        let model = Svm::<f64, Pr>::params()
            .eps(eps)
            .pos_neg_weights(c, c)
            .linear_kernel()
            .fit(&dataset)
            .context("SVM training failed")?;

        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, x: &Array2<f32>) -> Vec<i32> {
        self.predict_scores(x)
            .iter()
            .map(|&score| if score > 0.5 { 1 } else { 0 })
            .collect()
    }

    fn predict_scores(&self, x: &Array2<f32>) -> Vec<f32> {
        let records = to_ndarray_f64(x);
        let predictions: ndarray::Array1<Pr> = self.fitted().predict(&records);
        predictions.iter().map(|&p| *p).collect()
    }

    fn predict_proba(&self, _x: &Array2<f32>) -> Option<Vec<f32>> {
        None
    }

    fn name(&self) -> &'static str {
        "Linear SVM"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelFamily;
    use crate::math::Array2;

    #[test]
    fn svm_separates_shifted_clusters() {
        let x = Array2::from_shape_vec(
            (10, 2),
            vec![
                -2.0, 0.1, -1.8, -0.2, -2.2, 0.3, -1.9, 0.0, -2.1, -0.1, 2.0, 0.2, 1.8, -0.3, 2.2,
                0.1, 1.9, -0.2, 2.1, 0.0,
            ],
        )
        .unwrap();
        let y = vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1];

        let mut clf = SvmClassifier::new(ModelConfig::default_for(ModelFamily::LinearSvm));
        clf.fit(&x, &y).unwrap();

        let preds = clf.predict(&x);
        assert_eq!(preds, y);
    }

    #[test]
    fn svm_reports_no_probabilities() {
        let x = Array2::from_shape_vec((4, 1), vec![-1.0, -0.9, 1.0, 0.9]).unwrap();
        let y = vec![0, 0, 1, 1];
        let mut clf = SvmClassifier::new(ModelConfig::default_for(ModelFamily::LinearSvm));
        clf.fit(&x, &y).unwrap();
        assert!(clf.predict_proba(&x).is_none());
    }
}
