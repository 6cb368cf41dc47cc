//! Model explanation helpers.
//!
//! Contains a model-agnostic Monte-Carlo SHAP estimator producing
//! additive per-feature attributions for any fitted `Classifier`.
pub mod shap;

pub use shap::{mean_abs_importance, ShapConfig, ShapExplainer};
