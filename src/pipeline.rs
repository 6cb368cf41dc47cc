//! End-to-end comparison pipeline.
//!
//! Reads a labeled table, standardizes the features, grid-searches each
//! model family with stratified cross-validation, refits the best
//! candidate per family on the training split, and evaluates every
//! refit model on the held-out test split. Results land in the output
//! directory as CSV tables, standalone HTML plots, and a JSON summary.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde_json::json;

use crate::config::{ModelConfig, ModelFamily};
use crate::data_handling::Dataset;
use crate::explain::{mean_abs_importance, ShapConfig, ShapExplainer};
use crate::io::{read_table, write_importance_csv, write_metrics_csv};
use crate::math::Array1;
use crate::metrics::{roc_auc, roc_curve, ConfusionMatrix, RocCurve};
use crate::models::{build_model, Classifier};
use crate::preprocessing::StandardScaler;
use crate::report::{plot_confusion_grid, plot_importance_bar, plot_roc_overlay};
use crate::search::GridSearch;

/// Pipeline-level settings. `Default` values match the reference run:
/// a 20% test split, 5-fold cross-validation, and seed 42 everywhere.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub test_fraction: f32,
    pub n_folds: usize,
    pub seed: u64,
    pub shap: ShapConfig,
    /// Number of features shown in the importance bar chart.
    pub top_features: usize,
    pub families: Vec<ModelFamily>,
}

impl PipelineConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input: P, output_dir: Q) -> Self {
        PipelineConfig {
            input: input.into(),
            output_dir: output_dir.into(),
            test_fraction: 0.2,
            n_folds: 5,
            seed: 42,
            shap: ShapConfig::default(),
            top_features: 10,
            families: ModelFamily::ALL.to_vec(),
        }
    }
}

/// Held-out test metrics of one refit model.
#[derive(Debug, Clone)]
pub struct ModelEvaluation {
    pub name: String,
    pub config: ModelConfig,
    pub cv_accuracy: f32,
    pub accuracy: f32,
    pub weighted_f1: f32,
    pub roc_auc: f32,
    pub sensitivity: f32,
    pub specificity: f32,
    pub precision: f32,
    pub mcc: f32,
    pub confusion: ConfusionMatrix,
    pub roc: RocCurve,
    /// Whether the ROC scores came from calibrated probabilities or from
    /// the raw decision function.
    pub used_proba: bool,
}

/// Everything the pipeline produced, for callers that want to inspect
/// results instead of (or in addition to) the files on disk.
pub struct PipelineOutcome {
    pub evaluations: Vec<ModelEvaluation>,
    /// Mean |SHAP| per feature of the Random Forest, when it was run.
    pub importance: Option<Vec<f32>>,
}

/// Run the full comparison and write all artifacts to
/// `config.output_dir`.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutcome> {
    let started = chrono::Utc::now();

    let raw = read_table(&config.input)
        .with_context(|| format!("reading {}", config.input.display()))?;
    raw.log_input_summary();

    // The scaler is fit on the full matrix so train and test share one
    // transform.
    let (_, scaled_x) = StandardScaler::fit_transform(&raw.x);
    let data = Dataset::new(scaled_x, raw.y.clone(), raw.metadata.clone());

    let (train, test) = data.train_test_split(config.test_fraction, config.seed)?;
    log::info!(
        "Split: {} training rows, {} test rows",
        train.n_samples(),
        test.n_samples()
    );

    let search = GridSearch::new(config.n_folds, config.seed);
    let mut evaluations = Vec::with_capacity(config.families.len());
    let mut fitted: Vec<(ModelFamily, Box<dyn Classifier>)> = Vec::new();

    for &family in &config.families {
        let outcome = search
            .run(family, &train)
            .with_context(|| format!("grid search for {}", family))?;
        log::info!(
            "{}: best CV accuracy {:.4} with {}",
            family,
            outcome.best.mean_accuracy,
            outcome.best.config.describe()
        );

        let mut model = build_model(&outcome.best.config);
        model
            .fit(&train.x, &train.y.to_vec())
            .with_context(|| format!("refitting {} on the training split", family))?;

        let evaluation = evaluate_on_test(
            family,
            &outcome.best.config,
            outcome.best.mean_accuracy,
            model.as_ref(),
            &test,
        )?;
        log::info!(
            "{}: test accuracy {:.4}, ROC AUC {:.4}",
            family,
            evaluation.accuracy,
            evaluation.roc_auc
        );

        evaluations.push(evaluation);
        fitted.push((family, model));
    }

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    write_metrics_csv(config.output_dir.join("model_metrics.csv"), &evaluations)?;

    write_plot(
        plot_roc_overlay(&evaluations),
        &config.output_dir.join("roc_curves.html"),
    )?;
    write_plot(
        plot_confusion_grid(&evaluations),
        &config.output_dir.join("confusion_matrices.html"),
    )?;

    let importance = explain_random_forest(config, &fitted, &train, &test)?;

    write_summary_json(config, &evaluations, started)?;

    log::info!("All artifacts written to {}", config.output_dir.display());
    Ok(PipelineOutcome {
        evaluations,
        importance,
    })
}

fn evaluate_on_test(
    family: ModelFamily,
    config: &ModelConfig,
    cv_accuracy: f32,
    model: &dyn Classifier,
    test: &Dataset,
) -> Result<ModelEvaluation> {
    let predictions = model.predict(&test.x);
    let confusion = ConfusionMatrix::from_predictions(&test.y.to_vec(), &predictions)
        .with_context(|| format!("confusion matrix for {}", family))?;

    // ROC prefers calibrated probabilities; models without them are
    // ranked by their raw decision function instead.
    let (scores, used_proba) = match model.predict_proba(&test.x) {
        Some(probabilities) => (probabilities, true),
        None => {
            log::debug!("{}: no probabilities, ranking by decision function", family);
            (model.predict_scores(&test.x), false)
        }
    };

    let roc = roc_curve(&Array1::from_vec(scores), &test.y)
        .with_context(|| format!("ROC curve for {}", family))?;
    let auc = roc_auc(&roc);

    Ok(ModelEvaluation {
        name: family.name().to_string(),
        config: config.clone(),
        cv_accuracy,
        accuracy: confusion.accuracy(),
        weighted_f1: confusion.weighted_f1(),
        roc_auc: auc,
        sensitivity: confusion.sensitivity(),
        specificity: confusion.specificity(),
        precision: confusion.precision(),
        mcc: confusion.mcc(),
        confusion,
        roc,
        used_proba,
    })
}

/// SHAP values for the Random Forest on the test rows, with the
/// training matrix as background. Skipped when the forest is not among
/// the configured families.
fn explain_random_forest(
    config: &PipelineConfig,
    fitted: &[(ModelFamily, Box<dyn Classifier>)],
    train: &Dataset,
    test: &Dataset,
) -> Result<Option<Vec<f32>>> {
    let Some((_, forest)) = fitted
        .iter()
        .find(|(family, _)| *family == ModelFamily::RandomForest)
    else {
        log::debug!("Random Forest not in the run, skipping SHAP");
        return Ok(None);
    };

    log::info!(
        "Estimating SHAP values over {} test rows ({} permutations)",
        test.n_samples(),
        config.shap.n_permutations
    );
    let explainer = ShapExplainer::new(forest.as_ref(), &train.x, config.shap)?;
    let shap_values = explainer.shap_values(&test.x)?;
    let importance = mean_abs_importance(&shap_values);

    let feature_names = &test.metadata.feature_names;
    write_importance_csv(
        config.output_dir.join("shap_importance.csv"),
        feature_names,
        &importance,
    )?;
    write_plot(
        plot_importance_bar(feature_names, &importance, config.top_features),
        &config.output_dir.join("shap_top_features.html"),
    )?;

    Ok(Some(importance))
}

fn write_plot(plot: Result<plotly::Plot, String>, path: &Path) -> Result<()> {
    let plot = plot.map_err(|message| anyhow!(message))?;
    plot.write_html(path);
    log::debug!("Wrote {}", path.display());
    Ok(())
}

fn write_summary_json(
    config: &PipelineConfig,
    evaluations: &[ModelEvaluation],
    started: chrono::DateTime<chrono::Utc>,
) -> Result<()> {
    let models: Vec<serde_json::Value> = evaluations
        .iter()
        .map(|eval| {
            json!({
                "name": eval.name,
                "config": eval.config,
                "cv_accuracy": eval.cv_accuracy,
                "accuracy": eval.accuracy,
                "weighted_f1": eval.weighted_f1,
                "roc_auc": eval.roc_auc,
                "sensitivity": eval.sensitivity,
                "specificity": eval.specificity,
                "precision": eval.precision,
                "mcc": eval.mcc,
                "confusion": eval.confusion,
                "scores_from_probabilities": eval.used_proba,
            })
        })
        .collect();

    let summary = json!({
        "input": config.input.display().to_string(),
        "started_at": started.to_rfc3339(),
        "finished_at": chrono::Utc::now().to_rfc3339(),
        "test_fraction": config.test_fraction,
        "n_folds": config.n_folds,
        "seed": config.seed,
        "models": models,
    });

    let path = config.output_dir.join("summary.json");
    let file = std::fs::File::create(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, &summary)
        .context("serializing the run summary")?;
    Ok(())
}
