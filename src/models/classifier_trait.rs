use crate::math::Array2;

/// A small trait abstraction over the external model crates. The grid
/// search and the evaluation pipeline only talk to this contract, so
/// model implementations can live next to the crate-specific glue.
///
/// Labels use the crate convention: 1 for the positive class, 0 for the
/// negative class. `fit` must be called before any predict method.
pub trait Classifier {
    /// Fit the model on the given features and {0, 1} labels.
    fn fit(&mut self, x: &Array2<f32>, y: &[i32]) -> anyhow::Result<()>;

    /// Hard class predictions (0 or 1).
    fn predict(&self, x: &Array2<f32>) -> Vec<i32>;

    /// Ranking scores used for ROC estimation. Probabilities when the
    /// model produces them, raw margins otherwise; higher means more
    /// positive either way.
    fn predict_scores(&self, x: &Array2<f32>) -> Vec<f32>;

    /// Calibrated probabilities in [0, 1], or `None` for models that only
    /// expose a decision function. Callers fall back to
    /// `predict_scores` when this is `None`.
    fn predict_proba(&self, x: &Array2<f32>) -> Option<Vec<f32>> {
        Some(self.predict_scores(x))
    }

    /// Human readable model name.
    fn name(&self) -> &'static str {
        "classifier"
    }
}
