//! Reporting and plotting helpers.
//!
//! This module wraps plotting helpers (Plotly) converting evaluation
//! results into `plotly::Plot` values. Plots are written to disk as
//! standalone HTML files by the pipeline.
pub mod plots;

pub use plots::{plot_confusion_grid, plot_importance_bar, plot_roc_overlay};
