use crate::config::ModelConfig;
use crate::models::classifier_trait::Classifier;

/// Build a boxed classifier from a `ModelConfig`.
/// Currently this is a thin factory implemented as a single function.
pub fn build_model(config: &ModelConfig) -> Box<dyn Classifier> {
    match config {
        ModelConfig::Logistic { .. } => Box::new(
            crate::models::logistic::LogisticClassifier::new(config.clone()),
        ),
        ModelConfig::LinearSvm { .. } => {
            Box::new(crate::models::svm::SvmClassifier::new(config.clone()))
        }
        ModelConfig::RandomForest { .. } => Box::new(
            crate::models::random_forest::RandomForestClassifier::new(config.clone()),
        ),
        ModelConfig::Gbdt { .. } => {
            Box::new(crate::models::gbdt::GbdtClassifier::new(config.clone()))
        }
    }
}
