use std::collections::{BTreeMap, HashMap, HashSet};

use lazy_static::lazy_static;
use log::debug;
use ndarray::{Array1, Array2};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;
use super::utils::normalize_vector;

lazy_static! {
    /// Tokens are runs of two or more word characters.
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\b\w\w+\b").expect("token pattern is valid");
}

/// Splits `text` into lower-cased tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Turns free text into L2-normalized TF-IDF feature vectors.
///
/// The vocabulary is capped at `max_features` terms, keeping the terms that
/// occur most often across the fitted corpus. IDF weights are smoothed as if
/// one extra document contained every term, so no weight is ever zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: usize,
    vocabulary: BTreeMap<String, usize>,
    idf: Array1<f64>,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            vocabulary: BTreeMap::new(),
            idf: Array1::zeros(0),
        }
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Number of columns produced by [`transform`](Self::transform).
    pub fn num_features(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty() && self.idf.len() == self.vocabulary.len()
    }

    /// Checks that every vocabulary term owns a distinct column with a finite IDF weight.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(ClassifierError::Inconsistent(format!(
                "{} IDF weights for {} vocabulary terms",
                self.idf.len(),
                self.vocabulary.len()
            )));
        }

        let mut taken = vec![false; self.vocabulary.len()];
        for (term, &index) in &self.vocabulary {
            match taken.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(ClassifierError::Inconsistent(format!(
                        "term {:?} reuses column {}",
                        term, index
                    )))
                }
                None => {
                    return Err(ClassifierError::Inconsistent(format!(
                        "term {:?} maps to column {} of {}",
                        term,
                        index,
                        taken.len()
                    )))
                }
            }
        }

        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(ClassifierError::Inconsistent("non-finite IDF weight".into()));
        }
        Ok(())
    }

    /// Learns the vocabulary and IDF weights from `documents`.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<(), ClassifierError> {
        if documents.is_empty() {
            return Err(ClassifierError::Validation(
                "Cannot fit vectorizer on an empty corpus".into(),
            ));
        }
        if self.max_features == 0 {
            return Err(ClassifierError::Validation("max_features must be greater than 0".into()));
        }

        let mut term_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_counts: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let tokens = tokenize(doc.as_ref());
            let unique: HashSet<&String> = tokens.iter().collect();
            for term in unique {
                *doc_counts.entry(term.clone()).or_default() += 1;
            }
            for term in tokens {
                *term_counts.entry(term).or_default() += 1;
            }
        }

        if term_counts.is_empty() {
            return Err(ClassifierError::Validation(
                "Empty vocabulary; documents contain no tokens".into(),
            ));
        }

        let mut terms: Vec<(String, usize)> = term_counts.into_iter().collect();
        if terms.len() > self.max_features {
            terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            terms.truncate(self.max_features);
        }
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let n_docs = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Array1::zeros(terms.len());
        for (index, (term, _)) in terms.into_iter().enumerate() {
            let df = doc_counts.get(&term).copied().unwrap_or(0) as f64;
            idf[index] = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;
            vocabulary.insert(term, index);
        }

        debug!("Fitted vectorizer on {} documents, {} features", documents.len(), vocabulary.len());
        self.vocabulary = vocabulary;
        self.idf = idf;
        Ok(())
    }

    /// Converts one text into a feature vector. Terms outside the vocabulary are ignored.
    pub fn transform(&self, text: &str) -> Result<Array1<f64>, ClassifierError> {
        if !self.is_fitted() {
            return Err(ClassifierError::NotFitted("vectorizer has no vocabulary".into()));
        }

        let mut counts = Array1::<f64>::zeros(self.num_features());
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                let count = counts.get_mut(index).ok_or_else(|| {
                    ClassifierError::Inconsistent(format!(
                        "term {:?} maps to column {}",
                        token, index
                    ))
                })?;
                *count += 1.0;
            }
        }
        Ok(normalize_vector(&(counts * &self.idf)))
    }

    /// Converts each text into a row of the returned matrix.
    pub fn transform_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
    ) -> Result<Array2<f64>, ClassifierError> {
        let mut matrix = Array2::zeros((texts.len(), self.num_features()));
        for (row, text) in texts.iter().enumerate() {
            matrix.row_mut(row).assign(&self.transform(text.as_ref())?);
        }
        Ok(matrix)
    }

    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        documents: &[S],
    ) -> Result<Array2<f64>, ClassifierError> {
        self.fit(documents)?;
        self.transform_batch(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tampered(v: &TfidfVectorizer, edit: impl FnOnce(&mut serde_json::Value)) -> TfidfVectorizer {
        let mut value = serde_json::to_value(v).unwrap();
        edit(&mut value);
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_out_of_range_column_is_an_error() {
        let mut v = TfidfVectorizer::new(100);
        v.fit(&["chest pain", "tooth pain"]).unwrap();
        assert!(v.validate().is_ok());

        let broken = tampered(&v, |value| value["vocabulary"]["pain"] = 9999.into());
        assert!(matches!(broken.validate(), Err(ClassifierError::Inconsistent(_))));
        assert!(matches!(broken.transform("pain"), Err(ClassifierError::Inconsistent(_))));
        assert!(broken.transform("tooth").is_ok());
    }

    #[test]
    fn test_shared_column_is_an_error() {
        let mut v = TfidfVectorizer::new(100);
        v.fit(&["chest pain", "tooth pain"]).unwrap();
        let broken = tampered(&v, |value| value["vocabulary"]["tooth"] = 0.into());
        assert!(matches!(broken.validate(), Err(ClassifierError::Inconsistent(_))));
    }

    #[test]
    fn test_tokenize_drops_single_characters() {
        assert_eq!(tokenize("I have a Sore-Throat!"), vec!["have", "sore", "throat"]);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let mut v = TfidfVectorizer::new(100);
        v.fit(&["zebra apple", "mango apple"]).unwrap();
        let terms: Vec<&String> = v.vocabulary().keys().collect();
        assert_eq!(terms, vec!["apple", "mango", "zebra"]);
        assert_eq!(v.vocabulary()["apple"], 0);
        assert_eq!(v.vocabulary()["zebra"], 2);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let mut v = TfidfVectorizer::new(2);
        v.fit(&["pain pain fever", "pain cough fever", "rash"]).unwrap();
        assert_eq!(v.num_features(), 2);
        assert!(v.vocabulary().contains_key("pain"));
        assert!(v.vocabulary().contains_key("fever"));
    }

    #[test]
    fn test_smooth_idf() {
        let mut v = TfidfVectorizer::new(10);
        v.fit(&["common rare", "common"]).unwrap();
        let common = v.idf[v.vocabulary()["common"]];
        let rare = v.idf[v.vocabulary()["rare"]];
        assert!((common - 1.0).abs() < 1e-12);
        assert!((rare - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_transform_is_unit_length() {
        let mut v = TfidfVectorizer::new(100);
        v.fit(&["chest pain heart", "skin rash"]).unwrap();
        let x = v.transform("heart heart pain").unwrap();
        let norm: f64 = x.iter().map(|a| a * a).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_terms_give_zero_vector() {
        let mut v = TfidfVectorizer::new(100);
        v.fit(&["chest pain", "skin rash"]).unwrap();
        let x = v.transform("xyz qwerty").unwrap();
        assert!(x.iter().all(|&a| a == 0.0));
    }

    #[test]
    fn test_errors() {
        let v = TfidfVectorizer::new(100);
        assert!(matches!(v.transform("text"), Err(ClassifierError::NotFitted(_))));

        let mut v = TfidfVectorizer::new(100);
        let empty: [&str; 0] = [];
        assert!(v.fit(&empty).is_err());
        assert!(v.fit(&["a b c"]).is_err());

        let mut v = TfidfVectorizer::new(0);
        assert!(v.fit(&["some text"]).is_err());
    }
}
