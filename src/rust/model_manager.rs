use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::classifier::{ModelArtifacts, MultinomialNb, TfidfVectorizer};

/// File holding the fitted classifier.
pub const MODEL_FILE: &str = "doctor_specialization_model.json";
/// File holding the fitted vectorizer.
pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
/// Bumped whenever the serialized layout of either artifact changes.
pub const FORMAT_VERSION: u32 = 1;

const MODEL_KIND: &str = "multinomial_nb";
const VECTORIZER_KIND: &str = "tfidf_vectorizer";

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model artifacts not found in {}", .0.display())]
    Missing(PathBuf),
    #[error("Model artifacts incomplete: {} is missing", .0.display())]
    Incomplete(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Corrupt artifact {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },
    #[error("Unsupported format version {found} in {}, expected {expected}", .path.display())]
    FormatVersion { path: PathBuf, expected: u32, found: u32 },
}

#[derive(Deserialize)]
struct EnvelopeHeader {
    format_version: u32,
    kind: String,
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    format_version: u32,
    kind: String,
    payload: T,
}

/// Saves and loads the vectorizer/classifier pair.
///
/// Both artifacts live side by side in one directory and are always loaded
/// together: if either one is missing or unreadable, no model is loaded.
#[derive(Debug, Clone)]
pub struct ModelManager {
    models_dir: PathBuf,
}

impl ModelManager {
    /// Returns the default models directory path
    pub fn get_default_models_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("SPECIALIST_MODEL_DIR") {
            return PathBuf::from(path);
        }

        // 2. Fall back to the working directory
        PathBuf::from(".")
    }

    pub fn new<P: AsRef<Path>>(models_dir: P) -> Self {
        Self {
            models_dir: models_dir.as_ref().to_path_buf(),
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn get_model_path(&self) -> PathBuf {
        self.models_dir.join(MODEL_FILE)
    }

    pub fn get_vectorizer_path(&self) -> PathBuf {
        self.models_dir.join(VECTORIZER_FILE)
    }

    pub fn is_trained(&self) -> bool {
        let model_path = self.get_model_path();
        let vectorizer_path = self.get_vectorizer_path();
        log::debug!("Checking if model is trained:");
        log::debug!("  Model path: {:?} (exists: {})", model_path, model_path.exists());
        log::debug!(
            "  Vectorizer path: {:?} (exists: {})",
            vectorizer_path,
            vectorizer_path.exists()
        );
        model_path.exists() && vectorizer_path.exists()
    }

    /// Writes both artifacts, creating the models directory if needed.
    /// On failure neither file is left behind.
    pub fn save(&self, artifacts: &ModelArtifacts) -> Result<(), ModelError> {
        log::info!("Saving model artifacts to {:?}", self.models_dir);
        fs::create_dir_all(&self.models_dir)?;

        let result = self
            .write_artifact(&self.get_model_path(), MODEL_KIND, artifacts.classifier())
            .and_then(|_| {
                self.write_artifact(
                    &self.get_vectorizer_path(),
                    VECTORIZER_KIND,
                    artifacts.vectorizer(),
                )
            });

        if let Err(e) = result {
            log::error!("Failed to save model artifacts: {}", e);
            // Cleanup on failure
            let _ = self.remove();
            return Err(e);
        }
        log::info!("Model and vectorizer saved successfully");
        Ok(())
    }

    /// Loads both artifacts.
    pub fn load(&self) -> Result<ModelArtifacts, ModelError> {
        let model_path = self.get_model_path();
        let vectorizer_path = self.get_vectorizer_path();

        match (model_path.exists(), vectorizer_path.exists()) {
            (false, false) => return Err(ModelError::Missing(self.models_dir.clone())),
            (false, true) => return Err(ModelError::Incomplete(model_path)),
            (true, false) => return Err(ModelError::Incomplete(vectorizer_path)),
            (true, true) => {}
        }

        let classifier: MultinomialNb = self.read_artifact(&model_path, MODEL_KIND)?;
        classifier.validate().map_err(|e| ModelError::Corrupt {
            path: model_path.clone(),
            reason: e.to_string(),
        })?;
        let vectorizer: TfidfVectorizer = self.read_artifact(&vectorizer_path, VECTORIZER_KIND)?;
        vectorizer.validate().map_err(|e| ModelError::Corrupt {
            path: vectorizer_path.clone(),
            reason: e.to_string(),
        })?;

        ModelArtifacts::new(vectorizer, classifier).map_err(|e| ModelError::Corrupt {
            path: model_path,
            reason: e.to_string(),
        })
    }

    /// Loads both artifacts, or logs why they could not be loaded and returns `None`.
    pub fn load_or_fallback(&self) -> Option<ModelArtifacts> {
        match self.load() {
            Ok(artifacts) => {
                let info = artifacts.info();
                log::info!(
                    "Model and vectorizer loaded successfully ({} features, {} classes)",
                    info.num_features,
                    info.class_labels.len()
                );
                Some(artifacts)
            }
            Err(ModelError::Missing(dir)) => {
                log::warn!(
                    "Model files not found in {:?}; train the model first. \
                     Using keyword-based prediction",
                    dir
                );
                None
            }
            Err(e) => {
                log::warn!("Failed to load model artifacts: {}. Using keyword-based prediction", e);
                None
            }
        }
    }

    pub fn remove(&self) -> Result<(), ModelError> {
        let model_path = self.get_model_path();
        let vectorizer_path = self.get_vectorizer_path();

        if model_path.exists() {
            fs::remove_file(&model_path)?;
        }
        if vectorizer_path.exists() {
            fs::remove_file(&vectorizer_path)?;
        }
        Ok(())
    }

    fn write_artifact<T: Serialize>(
        &self,
        path: &Path,
        kind: &str,
        payload: &T,
    ) -> Result<(), ModelError> {
        let envelope = Envelope {
            format_version: FORMAT_VERSION,
            kind: kind.to_string(),
            payload,
        };
        let bytes = serde_json::to_vec(&envelope).map_err(|e| ModelError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        log::debug!("Writing {} bytes to {:?}", bytes.len(), path);
        fs::write(path, bytes)?;
        Ok(())
    }

    fn read_artifact<T: DeserializeOwned>(
        &self,
        path: &Path,
        kind: &str,
    ) -> Result<T, ModelError> {
        let bytes = fs::read(path)?;
        let corrupt = |e: serde_json::Error| ModelError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let header: EnvelopeHeader = serde_json::from_slice(&bytes).map_err(corrupt)?;
        if header.format_version != FORMAT_VERSION {
            return Err(ModelError::FormatVersion {
                path: path.to_path_buf(),
                expected: FORMAT_VERSION,
                found: header.format_version,
            });
        }
        if header.kind != kind {
            return Err(ModelError::Corrupt {
                path: path.to_path_buf(),
                reason: format!("expected a {} artifact, found {}", kind, header.kind),
            });
        }

        let envelope: Envelope<T> = serde_json::from_slice(&bytes).map_err(corrupt)?;
        Ok(envelope.payload)
    }
}
