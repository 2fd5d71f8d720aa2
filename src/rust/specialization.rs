use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierError;

/// The closed set of medical specializations a symptom description can be routed to.
///
/// The declaration order is significant: it is the order in which the keyword
/// classifier scans specializations, so an earlier variant wins over a later one
/// when a text mentions keywords of both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Specialization {
    #[serde(rename = "General Physician")]
    GeneralPhysician,
    #[serde(rename = "Cardiologist")]
    Cardiologist,
    #[serde(rename = "Dermatologist")]
    Dermatologist,
    #[serde(rename = "Pediatrician")]
    Pediatrician,
    #[serde(rename = "Orthopedic")]
    Orthopedic,
    #[serde(rename = "Neurologist")]
    Neurologist,
    #[serde(rename = "Psychiatrist")]
    Psychiatrist,
    #[serde(rename = "Gynecologist")]
    Gynecologist,
    #[serde(rename = "ENT Specialist")]
    EntSpecialist,
    #[serde(rename = "Dentist")]
    Dentist,
    #[serde(rename = "Ophthalmologist")]
    Ophthalmologist,
    #[serde(rename = "Gastroenterologist")]
    Gastroenterologist,
}

impl Specialization {
    /// Every specialization, in enumeration order.
    pub const ALL: [Specialization; 12] = [
        Specialization::GeneralPhysician,
        Specialization::Cardiologist,
        Specialization::Dermatologist,
        Specialization::Pediatrician,
        Specialization::Orthopedic,
        Specialization::Neurologist,
        Specialization::Psychiatrist,
        Specialization::Gynecologist,
        Specialization::EntSpecialist,
        Specialization::Dentist,
        Specialization::Ophthalmologist,
        Specialization::Gastroenterologist,
    ];

    /// The label used when no better match exists.
    pub const DEFAULT: Specialization = Specialization::GeneralPhysician;

    /// Returns the human-readable label, e.g. `"ENT Specialist"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::GeneralPhysician => "General Physician",
            Self::Cardiologist => "Cardiologist",
            Self::Dermatologist => "Dermatologist",
            Self::Pediatrician => "Pediatrician",
            Self::Orthopedic => "Orthopedic",
            Self::Neurologist => "Neurologist",
            Self::Psychiatrist => "Psychiatrist",
            Self::Gynecologist => "Gynecologist",
            Self::EntSpecialist => "ENT Specialist",
            Self::Dentist => "Dentist",
            Self::Ophthalmologist => "Ophthalmologist",
            Self::Gastroenterologist => "Gastroenterologist",
        }
    }
}

impl Default for Specialization {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Specialization {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|spec| spec.label() == s)
            .ok_or_else(|| ClassifierError::Validation(format!("Unknown specialization: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_from_str() {
        for spec in Specialization::ALL {
            assert_eq!(spec.label().parse::<Specialization>().unwrap(), spec);
        }
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        assert!("Veterinarian".parse::<Specialization>().is_err());
        assert!("general physician".parse::<Specialization>().is_err());
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Specialization::EntSpecialist).unwrap();
        assert_eq!(json, "\"ENT Specialist\"");
        let back: Specialization = serde_json::from_str("\"General Physician\"").unwrap();
        assert_eq!(back, Specialization::GeneralPhysician);
    }

    #[test]
    fn test_enumeration_order() {
        assert_eq!(Specialization::ALL.first(), Some(&Specialization::GeneralPhysician));
        assert_eq!(Specialization::ALL.last(), Some(&Specialization::Gastroenterologist));
        assert!(Specialization::ALL.windows(2).all(|w| w[0] < w[1]));
    }
}
