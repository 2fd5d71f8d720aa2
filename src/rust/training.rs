//! Offline training run over the built-in sample dataset.

use log::info;

use crate::classifier::{sample_dataset, ClassifierError, ModelBuilder, TrainedModel};
use crate::classifier::builder::{DEFAULT_MAX_FEATURES, DEFAULT_SEED, DEFAULT_TEST_SIZE};
use crate::model_manager::{ModelError, ModelManager};

/// Input used for the sample prediction printed after training.
pub const SAMPLE_SYMPTOMS: &str = "I have severe chest pain and difficulty breathing";

#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOptions {
    pub max_features: usize,
    pub test_size: f64,
    pub seed: u64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

/// Fits the model on the sample dataset and saves both artifacts through `manager`.
pub fn train(
    manager: &ModelManager,
    options: &TrainingOptions,
) -> Result<TrainedModel, TrainingError> {
    let dataset = sample_dataset();
    info!("Loaded {} labeled examples", dataset.len());

    let trained = ModelBuilder::new()
        .with_max_features(options.max_features)
        .with_test_size(options.test_size)?
        .with_seed(options.seed)
        .with_dataset(&dataset)?
        .build()?;

    manager.save(&trained.artifacts)?;
    Ok(trained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpecialistPredictor;
    use tempfile::TempDir;

    #[test]
    fn test_train_writes_loadable_artifacts() {
        let dir = TempDir::new().unwrap();
        let manager = ModelManager::new(dir.path());

        let trained = train(&manager, &TrainingOptions::default()).unwrap();
        assert_eq!(trained.train_size, 19);
        assert_eq!(trained.test_size, 5);
        assert!(manager.is_trained());

        let loaded = manager.load().unwrap();
        assert_eq!(
            loaded.predict(SAMPLE_SYMPTOMS).unwrap(),
            trained.artifacts.predict(SAMPLE_SYMPTOMS).unwrap()
        );
    }

    #[test]
    fn test_invalid_options_save_nothing() {
        let dir = TempDir::new().unwrap();
        let manager = ModelManager::new(dir.path());
        let options = TrainingOptions {
            test_size: 1.5,
            ..TrainingOptions::default()
        };
        assert!(matches!(train(&manager, &options), Err(TrainingError::Classifier(_))));
        assert!(!manager.is_trained());
    }
}
