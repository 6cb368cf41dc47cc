pub mod classifier_trait;
pub mod factory;
pub mod gbdt;
pub mod logistic;
pub mod random_forest;
pub mod svm;
pub mod utils;

pub use classifier_trait::Classifier;
pub use factory::build_model;
