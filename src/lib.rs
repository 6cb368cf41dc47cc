//! tabclf: cross-validated benchmarking of tabular binary classifiers.
//!
//! This crate loads a labeled CSV table, standardizes its features, and
//! compares four classifier families (logistic regression, linear SVM,
//! random forest, gradient boosting) selected by exhaustive grid search
//! with k-fold cross-validation. Held-out metrics, ROC overlays,
//! confusion-matrix grids, and Monte-Carlo SHAP attributions are exported
//! as CSV and standalone HTML plots.
//!
//! The design favors small, testable modules: model training is delegated
//! to external crates (`linfa-*`, `gbdt`) behind a common `Classifier`
//! trait, and everything above that trait is plain sequential glue.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod explain;
pub mod io;
pub mod math;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
pub mod report;
pub mod search;
