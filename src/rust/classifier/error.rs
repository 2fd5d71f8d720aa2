use thiserror::Error;

/// Represents the different types of errors that can occur while fitting or running the text model.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Error occurred due to invalid input parameters
    #[error("Validation error: {0}")]
    Validation(String),
    /// A feature vector did not have the width the model was fitted with
    #[error("Dimension mismatch: expected {expected} features, got {actual}")]
    Dimension { expected: usize, actual: usize },
    /// The model was used before it was fitted
    #[error("Model is not fitted: {0}")]
    NotFitted(String),
    /// Fitted state whose parts disagree with each other, e.g. a hand-edited artifact
    #[error("Inconsistent model: {0}")]
    Inconsistent(String),
    /// Error occurred during the build phase
    #[error("Build error: {0}")]
    Build(String),
}
