use serde::{Deserialize, Serialize};

use crate::Specialization;

/// One training row: a symptom description and the specialization it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub text: String,
    pub label: Specialization,
}

impl LabeledExample {
    pub fn new(text: impl Into<String>, label: Specialization) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

const SAMPLE_DATA: [(&str, Specialization); 24] = [
    ("fever cold cough body pain", Specialization::GeneralPhysician),
    ("chest pain breathing difficulty heart palpitation", Specialization::Cardiologist),
    ("skin rash itching acne pigmentation", Specialization::Dermatologist),
    ("baby fever vaccination child growth", Specialization::Pediatrician),
    ("bone fracture joint pain knee pain back pain", Specialization::Orthopedic),
    ("headache migraine seizure paralysis", Specialization::Neurologist),
    ("depression anxiety stress mental health", Specialization::Psychiatrist),
    ("pregnancy menstrual period cramps", Specialization::Gynecologist),
    ("ear pain throat infection hearing loss", Specialization::EntSpecialist),
    ("tooth pain cavity dental gum bleeding", Specialization::Dentist),
    ("eye pain vision problem sight blur", Specialization::Ophthalmologist),
    ("stomach pain digestive liver acid reflux", Specialization::Gastroenterologist),
    ("high fever viral infection weakness fatigue", Specialization::GeneralPhysician),
    ("cardiac arrest heart attack blood pressure", Specialization::Cardiologist),
    ("eczema hair loss nail problem", Specialization::Dermatologist),
    ("infant vaccination pediatric checkup", Specialization::Pediatrician),
    ("arthritis muscle pain spine issue", Specialization::Orthopedic),
    ("brain stroke nerve damage neurological", Specialization::Neurologist),
    ("panic attack mood disorder psychological", Specialization::Psychiatrist),
    ("ovarian cyst pcos women health", Specialization::Gynecologist),
    ("tonsil sinus nose blocked voice hoarse", Specialization::EntSpecialist),
    ("jaw pain oral infection teeth alignment", Specialization::Dentist),
    ("cataract retina problem glasses needed", Specialization::Ophthalmologist),
    ("constipation gastric ulcer intestine problem", Specialization::Gastroenterologist),
];

/// The hand-written sample dataset: two rows per specialization.
pub fn sample_dataset() -> Vec<LabeledExample> {
    SAMPLE_DATA
        .iter()
        .map(|(text, label)| LabeledExample::new(*text, *label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_rows_per_specialization() {
        let data = sample_dataset();
        assert_eq!(data.len(), 24);
        for spec in Specialization::ALL {
            assert_eq!(data.iter().filter(|e| e.label == spec).count(), 2, "{}", spec);
        }
    }
}
