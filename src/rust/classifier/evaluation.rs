use std::fmt;

use serde::Serialize;

use crate::Specialization;

/// Precision, recall and F1 for one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassReport {
    pub label: Specialization,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Test-split metrics for a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub accuracy: f64,
    /// One entry per label present in either the truth or the predictions, sorted by label.
    pub per_class: Vec<ClassReport>,
    pub macro_avg: ClassReport,
    pub weighted_avg: ClassReport,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

impl Evaluation {
    /// Compares predictions against the true labels. Undefined ratios count as 0.
    pub fn compute(truth: &[Specialization], predicted: &[Specialization]) -> Self {
        let total = truth.len().min(predicted.len());
        let pairs = || truth.iter().zip(predicted.iter());
        let correct = pairs().filter(|(t, p)| t == p).count();

        let mut labels: Vec<Specialization> =
            truth.iter().chain(predicted.iter()).copied().collect();
        labels.sort_by_key(|spec| spec.label());
        labels.dedup();

        let per_class: Vec<ClassReport> = labels
            .into_iter()
            .map(|label| {
                let tp = pairs().filter(|(t, p)| **t == label && **p == label).count();
                let predicted_count = pairs().filter(|(_, p)| **p == label).count();
                let support = pairs().filter(|(t, _)| **t == label).count();
                let precision = ratio(tp, predicted_count);
                let recall = ratio(tp, support);
                ClassReport {
                    label,
                    precision,
                    recall,
                    f1: f1(precision, recall),
                    support,
                }
            })
            .collect();

        let n_classes = per_class.len().max(1) as f64;
        let weight_total = per_class.iter().map(|c| c.support).sum::<usize>().max(1) as f64;
        let average = |weight: &dyn Fn(&ClassReport) -> f64, denominator: f64| ClassReport {
            label: Specialization::DEFAULT,
            precision: per_class.iter().map(|c| c.precision * weight(c)).sum::<f64>() / denominator,
            recall: per_class.iter().map(|c| c.recall * weight(c)).sum::<f64>() / denominator,
            f1: per_class.iter().map(|c| c.f1 * weight(c)).sum::<f64>() / denominator,
            support: total,
        };
        let macro_avg = average(&|_| 1.0, n_classes);
        let weighted_avg = average(&|c| c.support as f64, weight_total);

        Self {
            accuracy: ratio(correct, total),
            per_class,
            macro_avg,
            weighted_avg,
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>20} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.per_class {
            writeln!(
                f,
                "{:>20} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.label.label(),
                c.precision,
                c.recall,
                c.f1,
                c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>20} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        for (name, avg) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>20} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, avg.precision, avg.recall, avg.f1, avg.support
            )?;
        }
        Ok(())
    }
}
