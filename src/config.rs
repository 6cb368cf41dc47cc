use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four classifier families compared by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    Logistic,
    LinearSvm,
    RandomForest,
    Gbdt,
}

impl ModelFamily {
    pub const ALL: [ModelFamily; 4] = [
        ModelFamily::Logistic,
        ModelFamily::LinearSvm,
        ModelFamily::RandomForest,
        ModelFamily::Gbdt,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelFamily::Logistic => "Logistic Regression",
            ModelFamily::LinearSvm => "Linear SVM",
            ModelFamily::RandomForest => "Random Forest",
            ModelFamily::Gbdt => "Gradient Boosting",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logistic" | "logreg" => Ok(ModelFamily::Logistic),
            "svm" | "linear_svm" => Ok(ModelFamily::LinearSvm),
            "random_forest" | "rf" => Ok(ModelFamily::RandomForest),
            "gbdt" | "gradient_boosting" => Ok(ModelFamily::Gbdt),
            _ => Err(format!(
                "Unknown model family: {}. Valid options are: logistic, svm, random_forest, gbdt",
                s
            )),
        }
    }
}

/// Hyper-parameters for a single model candidate.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum ModelConfig {
    Logistic {
        alpha: f64,
        max_iterations: u64,
    },
    LinearSvm {
        c: f64,
        eps: f64,
    },
    RandomForest {
        n_trees: usize,
        max_depth: Option<usize>,
        seed: u64,
    },
    Gbdt {
        learning_rate: f32,
        max_depth: u32,
        num_boost_round: u32,
    },
}

impl ModelConfig {
    pub fn family(&self) -> ModelFamily {
        match self {
            ModelConfig::Logistic { .. } => ModelFamily::Logistic,
            ModelConfig::LinearSvm { .. } => ModelFamily::LinearSvm,
            ModelConfig::RandomForest { .. } => ModelFamily::RandomForest,
            ModelConfig::Gbdt { .. } => ModelFamily::Gbdt,
        }
    }

    /// Compact single-line description used in exports and logs.
    pub fn describe(&self) -> String {
        match self {
            ModelConfig::Logistic {
                alpha,
                max_iterations,
            } => format!("alpha={} max_iterations={}", alpha, max_iterations),
            ModelConfig::LinearSvm { c, eps } => format!("c={} eps={}", c, eps),
            ModelConfig::RandomForest {
                n_trees, max_depth, ..
            } => match max_depth {
                Some(d) => format!("n_trees={} max_depth={}", n_trees, d),
                None => format!("n_trees={} max_depth=none", n_trees),
            },
            ModelConfig::Gbdt {
                learning_rate,
                max_depth,
                num_boost_round,
            } => format!(
                "learning_rate={} max_depth={} num_boost_round={}",
                learning_rate, max_depth, num_boost_round
            ),
        }
    }

    pub fn default_for(family: ModelFamily) -> Self {
        match family {
            ModelFamily::Logistic => ModelConfig::Logistic {
                alpha: 1.0,
                max_iterations: 200,
            },
            ModelFamily::LinearSvm => ModelConfig::LinearSvm { c: 1.0, eps: 1e-3 },
            ModelFamily::RandomForest => ModelConfig::RandomForest {
                n_trees: 100,
                max_depth: Some(8),
                seed: 42,
            },
            ModelFamily::Gbdt => ModelConfig::Gbdt {
                learning_rate: 0.1,
                max_depth: 6,
                num_boost_round: 50,
            },
        }
    }
}

/// Exhaustive hyper-parameter grid for one family. `seed` is carried
/// into candidates with stochastic training (the random forest's
/// bootstrap draws).
///
/// The grids are deliberately small; every candidate is scored with k-fold
/// cross-validation, so grid size multiplies training cost.
pub fn search_grid(family: ModelFamily, seed: u64) -> Vec<ModelConfig> {
    match family {
        ModelFamily::Logistic => [0.01, 0.1, 1.0, 10.0]
            .iter()
            .map(|&alpha| ModelConfig::Logistic {
                alpha,
                max_iterations: 200,
            })
            .collect(),
        ModelFamily::LinearSvm => [0.1, 1.0, 10.0]
            .iter()
            .map(|&c| ModelConfig::LinearSvm { c, eps: 1e-3 })
            .collect(),
        ModelFamily::RandomForest => {
            let mut grid = Vec::new();
            for &n_trees in &[50usize, 100] {
                for &max_depth in &[Some(4), Some(8), None] {
                    grid.push(ModelConfig::RandomForest {
                        n_trees,
                        max_depth,
                        seed,
                    });
                }
            }
            grid
        }
        ModelFamily::Gbdt => {
            let mut grid = Vec::new();
            for &learning_rate in &[0.05f32, 0.1] {
                for &max_depth in &[3u32, 6] {
                    grid.push(ModelConfig::Gbdt {
                        learning_rate,
                        max_depth,
                        num_boost_round: 50,
                    });
                }
            }
            grid
        }
    }
}
