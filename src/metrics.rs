//! Binary-classification metrics: confusion matrix, derived scalar
//! scores, and ROC curve estimation.

use serde::Serialize;

use crate::error::MetricsError;
use crate::math::Array1;

/// 2x2 confusion matrix for binary labels (0 negative, 1 positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub tn: usize,
    pub fp: usize,
    pub fn_: usize,
    pub tp: usize,
}

impl ConfusionMatrix {
    pub fn from_predictions(y_true: &[i32], y_pred: &[i32]) -> Result<Self, MetricsError> {
        if y_true.len() != y_pred.len() {
            return Err(MetricsError::LengthMismatch);
        }
        let mut cm = ConfusionMatrix {
            tn: 0,
            fp: 0,
            fn_: 0,
            tp: 0,
        };
        for (&truth, &pred) in y_true.iter().zip(y_pred.iter()) {
            match (truth, pred) {
                (0, 0) => cm.tn += 1,
                (0, _) => cm.fp += 1,
                (_, 0) => cm.fn_ += 1,
                _ => cm.tp += 1,
            }
        }
        Ok(cm)
    }

    pub fn total(&self) -> usize {
        self.tn + self.fp + self.fn_ + self.tp
    }

    pub fn accuracy(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.tp + self.tn) as f32 / total as f32
    }

    /// Positive predictive value: tp / (tp + fp).
    pub fn precision(&self) -> f32 {
        ratio(self.tp, self.tp + self.fp)
    }

    /// True positive rate (recall): tp / (tp + fn).
    pub fn sensitivity(&self) -> f32 {
        ratio(self.tp, self.tp + self.fn_)
    }

    /// True negative rate: tn / (tn + fp).
    pub fn specificity(&self) -> f32 {
        ratio(self.tn, self.tn + self.fp)
    }

    /// F1 of the positive class.
    pub fn f1_positive(&self) -> f32 {
        f1(self.tp, self.fp, self.fn_)
    }

    /// F1 of the negative class (0 treated as the positive label).
    pub fn f1_negative(&self) -> f32 {
        f1(self.tn, self.fn_, self.fp)
    }

    /// Support-weighted mean of the per-class F1 scores.
    pub fn weighted_f1(&self) -> f32 {
        let pos_support = self.tp + self.fn_;
        let neg_support = self.tn + self.fp;
        let total = pos_support + neg_support;
        if total == 0 {
            return 0.0;
        }
        (self.f1_positive() * pos_support as f32 + self.f1_negative() * neg_support as f32)
            / total as f32
    }

    /// Matthews correlation coefficient; 0.0 when any marginal is empty.
    pub fn mcc(&self) -> f32 {
        let tp = self.tp as f64;
        let tn = self.tn as f64;
        let fp = self.fp as f64;
        let fn_ = self.fn_ as f64;

        let denom = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
        if denom == 0.0 {
            return 0.0;
        }
        ((tp * tn - fp * fn_) / denom) as f32
    }
}

fn ratio(num: usize, denom: usize) -> f32 {
    if denom == 0 {
        0.0
    } else {
        num as f32 / denom as f32
    }
}

fn f1(tp: usize, fp: usize, fn_: usize) -> f32 {
    let denom = 2 * tp + fp + fn_;
    if denom == 0 {
        0.0
    } else {
        2.0 * tp as f32 / denom as f32
    }
}

/// ROC curve points, ordered from threshold +inf down.
#[derive(Debug, Clone)]
pub struct RocCurve {
    pub fpr: Vec<f32>,
    pub tpr: Vec<f32>,
    pub thresholds: Vec<f32>,
}

/// Estimate the ROC curve of a score against binary labels.
///
/// Scores are ranked descending and a threshold is placed after every
/// distinct score value; the curve is anchored at (0, 0) and ends at
/// (1, 1). Higher scores must indicate the positive class.
pub fn roc_curve(scores: &Array1<f32>, labels: &Array1<i32>) -> Result<RocCurve, MetricsError> {
    if scores.len() != labels.len() {
        return Err(MetricsError::LengthMismatch);
    }
    let nan_count = scores.iter().filter(|v| v.is_nan()).count();
    if nan_count > 0 {
        return Err(MetricsError::NaNFound(nan_count));
    }

    let positives = labels.iter().filter(|&&v| v == 1).count();
    let negatives = labels.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(MetricsError::SingleClass);
    }

    // Sort indices by score descending
    let mut sorted_indices = (0..scores.len()).collect::<Vec<usize>>();
    sorted_indices.sort_unstable_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut fpr = vec![0.0f32];
    let mut tpr = vec![0.0f32];
    let mut thresholds = vec![f32::INFINITY];

    let mut cum_tp = 0usize;
    let mut cum_fp = 0usize;

    for (rank, &idx) in sorted_indices.iter().enumerate() {
        if labels[idx] == 1 {
            cum_tp += 1;
        } else {
            cum_fp += 1;
        }

        // Emit a point only after the last of a run of tied scores
        let next_differs = match sorted_indices.get(rank + 1) {
            Some(&next) => scores[next] != scores[idx],
            None => true,
        };
        if next_differs {
            fpr.push(cum_fp as f32 / negatives as f32);
            tpr.push(cum_tp as f32 / positives as f32);
            thresholds.push(scores[idx]);
        }
    }

    Ok(RocCurve {
        fpr,
        tpr,
        thresholds,
    })
}

/// Area under the ROC curve by trapezoidal integration.
pub fn roc_auc(curve: &RocCurve) -> f32 {
    let mut auc = 0.0f64;
    for i in 1..curve.fpr.len() {
        let width = (curve.fpr[i] - curve.fpr[i - 1]) as f64;
        let height = (curve.tpr[i] + curve.tpr[i - 1]) as f64 / 2.0;
        auc += width * height;
    }
    auc as f32
}

/// Convenience: ROC AUC straight from scores and labels.
pub fn roc_auc_score(scores: &Array1<f32>, labels: &Array1<i32>) -> Result<f32, MetricsError> {
    Ok(roc_auc(&roc_curve(scores, labels)?))
}
