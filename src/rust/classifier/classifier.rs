use log::debug;

use super::error::ClassifierError;
use super::naive_bayes::MultinomialNb;
use super::vectorizer::TfidfVectorizer;
use crate::Specialization;

/// Something that can route a symptom description to a specialization.
///
/// The prediction service holds an optional `Arc<dyn SpecialistPredictor>`;
/// [`ModelArtifacts`] is the production implementation.
pub trait SpecialistPredictor: Send + Sync {
    fn predict(&self, text: &str) -> Result<Specialization, ClassifierError>;
}

/// A fitted vectorizer and classifier pair.
///
/// The two halves are only ever constructed, saved and loaded together.
///
/// # Thread Safety
///
/// All fields are plain owned data and the type is never mutated after
/// construction, so it is `Send + Sync` and can be shared behind an `Arc`:
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use specialist::{ModelBuilder, SpecialistPredictor, sample_dataset};
/// use std::sync::Arc;
/// use std::thread;
///
/// let trained = ModelBuilder::new().with_dataset(&sample_dataset())?.build()?;
/// let model = Arc::new(trained.artifacts);
///
/// let model_clone = Arc::clone(&model);
/// thread::spawn(move || {
///     model_clone.predict("tooth pain").unwrap();
/// }).join().unwrap();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifacts {
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNb,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<ModelArtifacts>();
    }
};

impl ModelArtifacts {
    /// Pairs a fitted vectorizer with a classifier fitted on its output.
    ///
    /// Both halves are validated, so a pair that makes it through here never
    /// indexes outside its own arrays when predicting.
    pub fn new(
        vectorizer: TfidfVectorizer,
        classifier: MultinomialNb,
    ) -> Result<Self, ClassifierError> {
        if !vectorizer.is_fitted() {
            return Err(ClassifierError::NotFitted("vectorizer has no vocabulary".into()));
        }
        if !classifier.is_fitted() {
            return Err(ClassifierError::NotFitted("classifier has no classes".into()));
        }
        vectorizer.validate()?;
        classifier.validate()?;
        if vectorizer.num_features() != classifier.num_features() {
            return Err(ClassifierError::Dimension {
                expected: vectorizer.num_features(),
                actual: classifier.num_features(),
            });
        }
        Ok(Self { vectorizer, classifier })
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &MultinomialNb {
        &self.classifier
    }

    /// Returns information about the fitted model
    pub fn info(&self) -> super::ModelInfo {
        super::ModelInfo {
            num_features: self.vectorizer.num_features(),
            max_features: self.vectorizer.max_features(),
            class_labels: self.classifier.classes().to_vec(),
        }
    }
}

impl SpecialistPredictor for ModelArtifacts {
    fn predict(&self, text: &str) -> Result<Specialization, ClassifierError> {
        let features = self.vectorizer.transform(&text.to_lowercase())?;
        let prediction = self.classifier.predict(features.view())?;
        debug!("Model predicted {} for {:?}", prediction, text);
        Ok(prediction)
    }
}
