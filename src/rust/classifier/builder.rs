use std::collections::HashSet;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::classifier::ModelArtifacts;
use super::dataset::LabeledExample;
use super::error::ClassifierError;
use super::evaluation::Evaluation;
use super::naive_bayes::MultinomialNb;
use super::vectorizer::TfidfVectorizer;
use crate::Specialization;

pub const DEFAULT_MAX_FEATURES: usize = 100;
pub const DEFAULT_TEST_SIZE: f64 = 0.2;
pub const DEFAULT_SEED: u64 = 42;

/// Outcome of [`ModelBuilder::build`]: the fitted artifacts plus their test-split metrics.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub artifacts: ModelArtifacts,
    pub evaluation: Evaluation,
    pub train_size: usize,
    pub test_size: usize,
}

/// A builder for fitting [`ModelArtifacts`] with a fluent interface.
///
/// The examples are shuffled with a seeded RNG and split into a training and a
/// test set; the vectorizer and classifier are fitted on the training set and
/// evaluated on the test set.
///
/// # Example
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use specialist::{ModelBuilder, Specialization};
///
/// let trained = ModelBuilder::new()
///     .with_max_features(50)
///     .with_test_size(0.25)?
///     .add_example("tooth pain cavity", Specialization::Dentist)?
///     .add_example("gum bleeding teeth", Specialization::Dentist)?
///     .add_example("chest pain heart", Specialization::Cardiologist)?
///     .add_example("blood pressure cardiac", Specialization::Cardiologist)?
///     .build()?;
///
/// assert_eq!(trained.train_size + trained.test_size, 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    examples: Vec<LabeledExample>,
    max_features: usize,
    test_size: f64,
    seed: u64,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            examples: Vec::new(),
            max_features: DEFAULT_MAX_FEATURES,
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SEED,
        }
    }

    /// Caps the vectorizer vocabulary size
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Sets the fraction of examples held out for evaluation. Must lie strictly between 0 and 1.
    pub fn with_test_size(mut self, test_size: f64) -> Result<Self, ClassifierError> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(ClassifierError::Validation(format!(
                "Test size must be between 0 and 1 (exclusive), got {}",
                test_size
            )));
        }
        self.test_size = test_size;
        Ok(self)
    }

    /// Sets the seed of the shuffle that precedes the train/test split
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn add_example(
        mut self,
        text: impl Into<String>,
        label: Specialization,
    ) -> Result<Self, ClassifierError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ClassifierError::Validation(format!(
                "Example {} cannot be empty",
                self.examples.len() + 1
            )));
        }
        self.examples.push(LabeledExample { text, label });
        Ok(self)
    }

    pub fn with_dataset(self, examples: &[LabeledExample]) -> Result<Self, ClassifierError> {
        examples
            .iter()
            .try_fold(self, |builder, example| {
                builder.add_example(example.text.clone(), example.label)
            })
    }

    /// Number of held-out examples for `n` rows: `ceil(n * test_size)`.
    fn held_out(&self, n: usize) -> usize {
        (n as f64 * self.test_size).ceil() as usize
    }

    /// Shuffles the examples with the configured seed and splits them into `(train, test)`.
    pub fn split(&self) -> Result<(Vec<LabeledExample>, Vec<LabeledExample>), ClassifierError> {
        let n = self.examples.len();
        let n_test = self.held_out(n);
        if n < 2 || n_test == 0 || n_test >= n {
            return Err(ClassifierError::Build(format!(
                "Cannot split {} examples with test size {}",
                n, self.test_size
            )));
        }

        let mut shuffled = self.examples.clone();
        let mut rng = StdRng::seed_from_u64(self.seed);
        shuffled.shuffle(&mut rng);

        let train = shuffled.split_off(n_test);
        Ok((train, shuffled))
    }

    /// Fits the vectorizer and classifier and evaluates them on the held-out split.
    ///
    /// # Returns
    /// * `Result<TrainedModel, ClassifierError>` - the fitted model, or an error if:
    ///   - Fewer than two distinct labels were added
    ///   - The examples cannot be split into non-empty train and test sets
    ///   - The training split produces an empty vocabulary
    pub fn build(self) -> Result<TrainedModel, ClassifierError> {
        let distinct: HashSet<Specialization> = self.examples.iter().map(|e| e.label).collect();
        if distinct.len() < 2 {
            return Err(ClassifierError::Build(
                "At least two distinct labels are required".to_string(),
            ));
        }

        let (train, test) = self.split()?;
        info!(
            "Training on {} examples, evaluating on {} (seed {})",
            train.len(),
            test.len(),
            self.seed
        );

        let train_texts: Vec<&str> = train.iter().map(|e| e.text.as_str()).collect();
        let train_labels: Vec<Specialization> = train.iter().map(|e| e.label).collect();

        let mut vectorizer = TfidfVectorizer::new(self.max_features);
        let x_train = vectorizer.fit_transform(&train_texts)?;
        debug!("Vocabulary size: {}", vectorizer.num_features());

        let mut classifier = MultinomialNb::default();
        classifier.fit(&x_train, &train_labels)?;

        let test_texts: Vec<&str> = test.iter().map(|e| e.text.as_str()).collect();
        let test_labels: Vec<Specialization> = test.iter().map(|e| e.label).collect();
        let x_test = vectorizer.transform_batch(&test_texts)?;
        let predicted = classifier.predict_batch(&x_test)?;
        let evaluation = Evaluation::compute(&test_labels, &predicted);
        info!("Model accuracy: {:.2}%", evaluation.accuracy * 100.0);

        Ok(TrainedModel {
            artifacts: ModelArtifacts::new(vectorizer, classifier)?,
            evaluation,
            train_size: train.len(),
            test_size: test.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::dataset::sample_dataset;
    use crate::SpecialistPredictor;

    #[test]
    fn test_sample_split_sizes() {
        let builder = ModelBuilder::new().with_dataset(&sample_dataset()).unwrap();
        let (train, test) = builder.split().unwrap();
        assert_eq!(train.len(), 19);
        assert_eq!(test.len(), 5);
    }

    #[test]
    fn test_split_is_deterministic_per_seed() {
        let builder = ModelBuilder::new().with_dataset(&sample_dataset()).unwrap();
        assert_eq!(builder.split().unwrap(), builder.split().unwrap());

        let (train, test) = builder.clone().with_seed(7).split().unwrap();
        let mut texts: Vec<String> = train.into_iter().chain(test).map(|e| e.text).collect();
        let mut expected: Vec<String> = sample_dataset().into_iter().map(|e| e.text).collect();
        texts.sort();
        expected.sort();
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_build_sample_model() {
        let trained = ModelBuilder::new()
            .with_dataset(&sample_dataset())
            .unwrap()
            .build()
            .unwrap();
        assert!((0.0..=1.0).contains(&trained.evaluation.accuracy));
        assert!(trained.artifacts.vectorizer().num_features() <= DEFAULT_MAX_FEATURES);

        let prediction = trained
            .artifacts
            .predict("I have severe chest pain and difficulty breathing")
            .unwrap();
        assert!(Specialization::ALL.contains(&prediction));
    }

    #[test]
    fn test_validation() {
        assert!(ModelBuilder::new().add_example("", Specialization::Dentist).is_err());
        assert!(ModelBuilder::new().add_example("   ", Specialization::Dentist).is_err());
        assert!(ModelBuilder::new().with_test_size(0.0).is_err());
        assert!(ModelBuilder::new().with_test_size(1.0).is_err());
        assert!(ModelBuilder::new().with_test_size(f64::NAN).is_err());
    }

    #[test]
    fn test_single_label_cannot_build() {
        let result = ModelBuilder::new()
            .add_example("tooth pain", Specialization::Dentist)
            .and_then(|b| b.add_example("gum bleeding", Specialization::Dentist))
            .and_then(|b| b.build());
        assert!(matches!(result, Err(ClassifierError::Build(_))));
    }

    #[test]
    fn test_too_few_examples_cannot_split() {
        let result = ModelBuilder::new()
            .add_example("tooth pain", Specialization::Dentist)
            .and_then(|b| b.build());
        assert!(result.is_err());
    }
}
