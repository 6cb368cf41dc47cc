use itertools_num::linspace;
use plotly::common::{DashType, Line, Mode};
use plotly::layout::{Axis, GridPattern, Layout, LayoutGrid};
use plotly::{Bar, HeatMap, Plot, Scatter};

use crate::pipeline::ModelEvaluation;

/// Overlay the ROC curves of all evaluated models, with a dashed
/// chance line for reference.
pub fn plot_roc_overlay(evaluations: &[ModelEvaluation]) -> Result<Plot, String> {
    if evaluations.is_empty() {
        return Err("No evaluations to plot".to_string());
    }

    let mut plot = Plot::new();

    for eval in evaluations {
        let fpr: Vec<f64> = eval.roc.fpr.iter().map(|&v| v as f64).collect();
        let tpr: Vec<f64> = eval.roc.tpr.iter().map(|&v| v as f64).collect();
        let trace = Scatter::new(fpr, tpr)
            .mode(Mode::Lines)
            .name(format!("{} (AUC = {:.3})", eval.name, eval.roc_auc));
        plot.add_trace(trace);
    }

    let diagonal: Vec<f64> = linspace(0.0, 1.0, 50).collect();
    let reference_line = Scatter::new(diagonal.clone(), diagonal)
        .mode(Mode::Lines)
        .name("Chance")
        .line(Line::new().color("red").dash(DashType::Dash));
    plot.add_trace(reference_line);

    let layout = Layout::new()
        .title("ROC Curves")
        .x_axis(Axis::new().title("False Positive Rate"))
        .y_axis(Axis::new().title("True Positive Rate"));
    plot.set_layout(layout);

    Ok(plot)
}

/// One confusion-matrix heatmap per model on a 2x2 grid.
pub fn plot_confusion_grid(evaluations: &[ModelEvaluation]) -> Result<Plot, String> {
    if evaluations.is_empty() {
        return Err("No evaluations to plot".to_string());
    }
    if evaluations.len() > 4 {
        return Err(format!(
            "Confusion grid supports at most 4 models, got {}",
            evaluations.len()
        ));
    }

    let x_labels = vec!["Predicted 0".to_string(), "Predicted 1".to_string()];
    let y_labels = vec!["Actual 0".to_string(), "Actual 1".to_string()];

    let mut plot = Plot::new();

    for (idx, eval) in evaluations.iter().enumerate() {
        let cm = &eval.confusion;
        let z = vec![
            vec![cm.tn as f64, cm.fp as f64],
            vec![cm.fn_ as f64, cm.tp as f64],
        ];
        let axis_suffix = if idx == 0 {
            String::new()
        } else {
            (idx + 1).to_string()
        };
        let trace = HeatMap::new(x_labels.clone(), y_labels.clone(), z)
            .name(eval.name.clone())
            .x_axis(format!("x{}", axis_suffix))
            .y_axis(format!("y{}", axis_suffix));
        plot.add_trace(trace);
    }

    let layout = Layout::new()
        .title("Confusion Matrices")
        .grid(
            LayoutGrid::new()
                .rows(2)
                .columns(2)
                .pattern(GridPattern::Independent),
        );
    plot.set_layout(layout);

    Ok(plot)
}

/// Bar chart of the `top_k` features by mean |SHAP| value.
pub fn plot_importance_bar(
    feature_names: &[String],
    importances: &[f32],
    top_k: usize,
) -> Result<Plot, String> {
    if feature_names.len() != importances.len() {
        return Err(format!(
            "{} feature names but {} importance values",
            feature_names.len(),
            importances.len()
        ));
    }
    if feature_names.is_empty() {
        return Err("No features to plot".to_string());
    }

    let mut order: Vec<usize> = (0..importances.len()).collect();
    order.sort_by(|&a, &b| {
        importances[b]
            .partial_cmp(&importances[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(top_k);

    let names: Vec<String> = order.iter().map(|&i| feature_names[i].clone()).collect();
    let values: Vec<f64> = order.iter().map(|&i| importances[i] as f64).collect();

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(names, values).name("mean |SHAP|"));
    plot.set_layout(
        Layout::new()
            .title("Top Feature Importances (mean |SHAP|)")
            .x_axis(Axis::new().title("Feature"))
            .y_axis(Axis::new().title("Mean |SHAP| value")),
    );

    Ok(plot)
}
