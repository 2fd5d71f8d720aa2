use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;
use super::utils::argmax;
use crate::Specialization;

/// Multinomial Naive Bayes over non-negative feature vectors (e.g. TF-IDF rows).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    /// Classes seen during fitting, sorted by label.
    classes: Vec<Specialization>,
    class_log_prior: Array1<f64>,
    /// Shape `(classes, features)`.
    feature_log_prob: Array2<f64>,
}

impl Default for MultinomialNb {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl MultinomialNb {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            classes: Vec::new(),
            class_log_prior: Array1::zeros(0),
            feature_log_prob: Array2::zeros((0, 0)),
        }
    }

    pub fn classes(&self) -> &[Specialization] {
        &self.classes
    }

    pub fn num_features(&self) -> usize {
        self.feature_log_prob.ncols()
    }

    pub fn is_fitted(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Checks that priors and per-class probabilities line up with the class list.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        let n_classes = self.classes.len();
        if self.class_log_prior.len() != n_classes || self.feature_log_prob.nrows() != n_classes {
            return Err(ClassifierError::Inconsistent(format!(
                "{} classes but {} priors and {} probability rows",
                n_classes,
                self.class_log_prior.len(),
                self.feature_log_prob.nrows()
            )));
        }
        let mut sorted = self.classes.clone();
        sorted.sort_by_key(|spec| spec.label());
        sorted.dedup();
        if sorted.len() != n_classes {
            return Err(ClassifierError::Inconsistent("duplicate class labels".into()));
        }
        if self.class_log_prior.iter().chain(self.feature_log_prob.iter()).any(|p| p.is_nan()) {
            return Err(ClassifierError::Inconsistent("NaN log probability".into()));
        }
        Ok(())
    }

    /// Estimates class priors and per-class feature probabilities with additive smoothing.
    pub fn fit(&mut self, x: &Array2<f64>, y: &[Specialization]) -> Result<(), ClassifierError> {
        if x.nrows() == 0 {
            return Err(ClassifierError::Validation(
                "Cannot fit classifier on an empty dataset".into(),
            ));
        }
        if x.nrows() != y.len() {
            return Err(ClassifierError::Validation(format!(
                "Feature matrix has {} rows but {} labels were given",
                x.nrows(),
                y.len()
            )));
        }
        if self.alpha.is_nan() || self.alpha <= 0.0 {
            return Err(ClassifierError::Validation(format!(
                "alpha must be positive, got {}",
                self.alpha
            )));
        }

        let mut classes: Vec<Specialization> = y.to_vec();
        classes.sort_by_key(|spec| spec.label());
        classes.dedup();

        let n_features = x.ncols();
        let mut feature_counts = Array2::<f64>::zeros((classes.len(), n_features));
        let mut class_counts = Array1::<f64>::zeros(classes.len());
        for (row, label) in x.axis_iter(Axis(0)).zip(y) {
            let c = classes.iter().position(|spec| spec == label).ok_or_else(|| {
                ClassifierError::Build(format!("Label {} missing from class list", label))
            })?;
            let mut counts = feature_counts.row_mut(c);
            counts += &row;
            class_counts[c] += 1.0;
        }

        let smoothed = feature_counts.mapv(|v| v + self.alpha);
        let totals = smoothed.sum_axis(Axis(1)).insert_axis(Axis(1));
        self.feature_log_prob = smoothed.mapv(f64::ln) - totals.mapv(f64::ln);
        self.class_log_prior = class_counts.mapv(|n| (n / y.len() as f64).ln());
        self.classes = classes;
        Ok(())
    }

    /// Joint log likelihood of each class for one feature vector.
    pub fn joint_log_likelihood(
        &self,
        x: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, ClassifierError> {
        if !self.is_fitted() {
            return Err(ClassifierError::NotFitted("classifier has no classes".into()));
        }
        if x.len() != self.num_features() {
            return Err(ClassifierError::Dimension {
                expected: self.num_features(),
                actual: x.len(),
            });
        }
        if self.class_log_prior.len() != self.feature_log_prob.nrows() {
            return Err(ClassifierError::Inconsistent(format!(
                "{} priors for {} probability rows",
                self.class_log_prior.len(),
                self.feature_log_prob.nrows()
            )));
        }
        Ok(self.feature_log_prob.dot(&x) + &self.class_log_prior)
    }

    /// Returns the most likely class for one feature vector.
    pub fn predict(&self, x: ArrayView1<'_, f64>) -> Result<Specialization, ClassifierError> {
        let jll = self.joint_log_likelihood(x)?;
        let index = argmax(jll.view())
            .ok_or_else(|| ClassifierError::NotFitted("classifier has no classes".into()))?;
        self.classes.get(index).copied().ok_or_else(|| {
            ClassifierError::Inconsistent(format!(
                "best row {} has no class among {}",
                index,
                self.classes.len()
            ))
        })
    }

    pub fn predict_batch(&self, x: &Array2<f64>) -> Result<Vec<Specialization>, ClassifierError> {
        x.axis_iter(Axis(0)).map(|row| self.predict(row)).collect()
    }
}
