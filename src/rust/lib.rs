//! Symptom-to-specialist text classification.
//!
//! A TF-IDF vectorizer and a multinomial Naive Bayes classifier are trained
//! offline on a small labeled dataset and saved as two artifacts. The HTTP
//! service loads them at startup and falls back to a deterministic keyword
//! table when they are not available.
//!
//! # Keyword Classification
//!
//! ```rust
//! use specialist::{classify, Specialization};
//!
//! assert_eq!(classify("my tooth hurts and gum is bleeding"), Specialization::Dentist);
//! // The first specialization in enumeration order wins
//! assert_eq!(classify("fever and heart racing"), Specialization::GeneralPhysician);
//! ```
//!
//! # Model Classification
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use specialist::{sample_dataset, ModelBuilder, SpecialistPredictor};
//!
//! let trained = ModelBuilder::new()
//!     .with_dataset(&sample_dataset())?
//!     .build()?;
//!
//! println!("Accuracy: {:.2}", trained.evaluation.accuracy);
//! let specialization = trained.artifacts.predict("skin rash and itching")?;
//! println!("Recommended specialist: {}", specialization);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod model_manager;
pub mod server;
mod specialization;
pub mod training;

pub use classifier::{
    classify, matched_keyword, sample_dataset, ClassifierError, Evaluation, LabeledExample,
    ModelArtifacts, ModelBuilder, ModelInfo, MultinomialNb, SpecialistPredictor, TfidfVectorizer,
    TrainedModel,
};
pub use config::ServiceConfig;
pub use model_manager::{ModelError, ModelManager};
pub use server::{build_router, AppState, PredictionSource, ServiceError};
pub use specialization::Specialization;

/// Installs `env_logger` as the `log` backend, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
