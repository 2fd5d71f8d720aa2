mod error;
mod classifier;
pub mod builder;
mod dataset;
mod evaluation;
pub mod keyword;
mod naive_bayes;
mod utils;
pub mod vectorizer;

pub use error::ClassifierError;
pub use classifier::{ModelArtifacts, SpecialistPredictor};
pub use builder::{ModelBuilder, TrainedModel};
pub use dataset::{sample_dataset, LabeledExample};
pub use evaluation::{ClassReport, Evaluation};
pub use keyword::{classify, matched_keyword};
pub use naive_bayes::MultinomialNb;
pub use vectorizer::TfidfVectorizer;

use crate::Specialization;

/// Information about a fitted model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    /// Number of columns the vectorizer produces
    pub num_features: usize,
    /// Vocabulary cap the vectorizer was fitted with
    pub max_features: usize,
    /// Labels the classifier can predict, sorted by label
    pub class_labels: Vec<Specialization>,
}
