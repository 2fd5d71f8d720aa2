use specialist::model_manager::{MODEL_FILE, VECTORIZER_FILE};
use specialist::training::{self, TrainingOptions, SAMPLE_SYMPTOMS};
use specialist::{ModelError, ModelManager, SpecialistPredictor, Specialization};
use tempfile::TempDir;

#[test]
fn test_model_paths() {
    let manager = ModelManager::new("/srv/specialist");
    assert!(manager.get_model_path().ends_with(MODEL_FILE));
    assert!(manager.get_vectorizer_path().ends_with(VECTORIZER_FILE));
    assert_eq!(MODEL_FILE, "doctor_specialization_model.json");
    assert_eq!(VECTORIZER_FILE, "tfidf_vectorizer.json");
}

#[test]
fn test_training_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let manager = ModelManager::new(dir.path());

    let trained = training::train(&manager, &TrainingOptions::default())?;
    assert!(manager.is_trained());
    assert!((0.0..=1.0).contains(&trained.evaluation.accuracy));
    assert_eq!(trained.evaluation.macro_avg.support, 5);

    let loaded = manager.load()?;
    let prediction = loaded.predict(SAMPLE_SYMPTOMS)?;
    assert!(Specialization::ALL.contains(&prediction));
    assert_eq!(prediction, trained.artifacts.predict(SAMPLE_SYMPTOMS)?);
    Ok(())
}

#[test]
fn test_either_artifact_missing_means_no_model() -> Result<(), Box<dyn std::error::Error>> {
    for missing in [MODEL_FILE, VECTORIZER_FILE] {
        let dir = TempDir::new()?;
        let manager = ModelManager::new(dir.path());
        training::train(&manager, &TrainingOptions::default())?;

        std::fs::remove_file(dir.path().join(missing))?;
        assert!(matches!(manager.load(), Err(ModelError::Incomplete(_))));
        assert!(manager.load_or_fallback().is_none());
    }
    Ok(())
}

#[test]
fn test_empty_directory_means_no_model() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let manager = ModelManager::new(dir.path().join("never-created"));
    assert!(!manager.is_trained());
    assert!(matches!(manager.load(), Err(ModelError::Missing(_))));
    assert!(manager.load_or_fallback().is_none());
    Ok(())
}

#[test]
fn test_truncated_artifact_means_no_model() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let manager = ModelManager::new(dir.path());
    training::train(&manager, &TrainingOptions::default())?;

    let path = manager.get_vectorizer_path();
    let bytes = std::fs::read(&path)?;
    std::fs::write(&path, &bytes[..bytes.len() / 2])?;
    assert!(matches!(manager.load(), Err(ModelError::Corrupt { .. })));
    assert!(manager.load_or_fallback().is_none());
    Ok(())
}
