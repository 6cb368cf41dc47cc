//! CSV table reader and result writers.
//!
//! The input layout follows the source data convention: a header row,
//! feature columns first, and a single trailing binary label column.
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::data_handling::{Dataset, TableMetadata};
use crate::math::{Array1, Array2};
use crate::pipeline::ModelEvaluation;

/// Configuration for reading labeled feature tables.
#[derive(Debug, Clone)]
pub struct TableReaderConfig {
    /// Field delimiter, `b','` by default.
    pub delimiter: u8,
    /// Column name holding the labels. When `None`, the trailing column
    /// is used.
    pub label_column: Option<String>,
}

impl Default for TableReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            label_column: None,
        }
    }
}

/// Read a labeled feature table with the default configuration.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    read_table_with_config(path, &TableReaderConfig::default())
}

/// Read a labeled feature table using a custom configuration.
pub fn read_table_with_config<P: AsRef<Path>>(
    path: P,
    config: &TableReaderConfig,
) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open table: {}", path.as_ref().display()))?;

    let headers = reader
        .headers()
        .context("Failed to read table header row")?
        .clone();
    if headers.len() < 2 {
        return Err(anyhow!(
            "Table needs at least one feature column and one label column, found {} columns",
            headers.len()
        ));
    }

    let label_idx = match &config.label_column {
        Some(name) => headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("Missing label column '{}'", name))?,
        None => headers.len() - 1,
    };

    let feature_indices: Vec<usize> = (0..headers.len()).filter(|&i| i != label_idx).collect();

    let mut features = Vec::new();
    let mut labels = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        for &idx in &feature_indices {
            let value = record
                .get(idx)
                .ok_or_else(|| anyhow!("Missing feature value at row {}", row_idx + 1))?;
            let parsed = value.trim().parse::<f32>().with_context(|| {
                format!(
                    "Invalid feature '{}' at row {}",
                    headers.get(idx).unwrap_or(""),
                    row_idx + 1
                )
            })?;
            features.push(parsed);
        }

        let raw_label = record
            .get(label_idx)
            .ok_or_else(|| anyhow!("Missing label value at row {}", row_idx + 1))?;
        labels.push(parse_label(raw_label, row_idx)?);
    }

    let n_samples = labels.len();
    let n_features = feature_indices.len();
    let x = Array2::from_shape_vec((n_samples, n_features), features)
        .context("Failed to build feature matrix")?;
    let y = Array1::from_vec(labels);

    let metadata = TableMetadata {
        feature_names: feature_indices
            .iter()
            .map(|&idx| headers.get(idx).unwrap_or("").to_string())
            .collect(),
        label_name: headers.get(label_idx).unwrap_or("").to_string(),
    };

    Ok(Dataset::new(x, y, metadata))
}

/// Accepts 0/1 or the -1/1 convention, normalizing to 0/1.
fn parse_label(value: &str, row_idx: usize) -> Result<i32> {
    let parsed = value
        .trim()
        .parse::<f32>()
        .with_context(|| format!("Invalid label '{}' at row {}", value, row_idx + 1))?;
    if parsed == 1.0 {
        Ok(1)
    } else if parsed == 0.0 || parsed == -1.0 {
        Ok(0)
    } else {
        Err(anyhow!(
            "Label must be 0/1 or -1/1, got {} at row {}",
            value.trim(),
            row_idx + 1
        ))
    }
}

/// Write the per-model evaluation table, one row per model.
pub fn write_metrics_csv<P: AsRef<Path>>(path: P, evaluations: &[ModelEvaluation]) -> Result<()> {
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;

    writer.write_record([
        "model",
        "accuracy",
        "weighted_f1",
        "roc_auc",
        "sensitivity",
        "specificity",
        "precision",
        "mcc",
        "tn",
        "fp",
        "fn",
        "tp",
        "cv_accuracy",
        "best_config",
    ])?;

    for eval in evaluations {
        writer.write_record([
            eval.name.clone(),
            format!("{:.6}", eval.accuracy),
            format!("{:.6}", eval.weighted_f1),
            format!("{:.6}", eval.roc_auc),
            format!("{:.6}", eval.sensitivity),
            format!("{:.6}", eval.specificity),
            format!("{:.6}", eval.precision),
            format!("{:.6}", eval.mcc),
            eval.confusion.tn.to_string(),
            eval.confusion.fp.to_string(),
            eval.confusion.fn_.to_string(),
            eval.confusion.tp.to_string(),
            format!("{:.6}", eval.cv_accuracy),
            eval.config.describe(),
        ])?;
    }

    writer.flush().context("Failed to flush metrics CSV")?;
    Ok(())
}

/// Write per-feature mean |SHAP| importances, sorted descending.
pub fn write_importance_csv<P: AsRef<Path>>(
    path: P,
    feature_names: &[String],
    importances: &[f32],
) -> Result<()> {
    if feature_names.len() != importances.len() {
        return Err(anyhow!(
            "{} feature names but {} importance values",
            feature_names.len(),
            importances.len()
        ));
    }

    let mut order: Vec<usize> = (0..importances.len()).collect();
    order.sort_by(|&a, &b| {
        importances[b]
            .partial_cmp(&importances[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;
    writer.write_record(["feature", "mean_abs_shap"])?;
    for idx in order {
        writer.write_record([
            feature_names[idx].clone(),
            format!("{:.6}", importances[idx]),
        ])?;
    }
    writer.flush().context("Failed to flush importance CSV")?;
    Ok(())
}
