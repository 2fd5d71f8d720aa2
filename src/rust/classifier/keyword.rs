//! Deterministic keyword classifier used when no trained model is available.

use log::debug;

use crate::Specialization;

/// Keywords per specialization, in scan order.
///
/// Both the outer order and the order within each list are part of the
/// classification contract: the first specialization with any matching
/// keyword wins.
pub const KEYWORD_TABLE: [(Specialization, &[&str]); 12] = [
    (
        Specialization::GeneralPhysician,
        &["fever", "cold", "cough", "flu", "infection", "general", "body pain", "weakness"],
    ),
    (
        Specialization::Cardiologist,
        &["heart", "chest pain", "blood pressure", "cardiac", "palpitation", "hypertension"],
    ),
    (
        Specialization::Dermatologist,
        &["skin", "rash", "acne", "hair", "nail", "itching", "pigmentation", "eczema"],
    ),
    (
        Specialization::Pediatrician,
        &["child", "baby", "infant", "kid", "vaccination", "growth"],
    ),
    (
        Specialization::Orthopedic,
        &["bone", "fracture", "joint", "knee", "back pain", "spine", "arthritis", "muscle"],
    ),
    (
        Specialization::Neurologist,
        &["headache", "migraine", "brain", "nerve", "seizure", "paralysis", "neurological"],
    ),
    (
        Specialization::Psychiatrist,
        &["depression", "anxiety", "stress", "mental", "psychological", "mood", "panic"],
    ),
    (
        Specialization::Gynecologist,
        &["pregnancy", "menstrual", "period", "women", "uterus", "ovarian", "pcos"],
    ),
    (
        Specialization::EntSpecialist,
        &["ear", "nose", "throat", "hearing", "tonsil", "sinus", "voice"],
    ),
    (
        Specialization::Dentist,
        &["tooth", "teeth", "dental", "gum", "cavity", "jaw", "oral"],
    ),
    (
        Specialization::Ophthalmologist,
        &["eye", "vision", "sight", "glasses", "cataract", "retina"],
    ),
    (
        Specialization::Gastroenterologist,
        &["stomach", "digestive", "liver", "intestine", "gastric", "acid", "constipation"],
    ),
];

/// Returns the specialization and keyword that decided the classification of `text`,
/// or `None` when no keyword occurs in it.
///
/// Matching is a plain substring test against the lower-cased text; no other
/// normalization is applied.
pub fn matched_keyword(text: &str) -> Option<(Specialization, &'static str)> {
    let lowered = text.to_lowercase();
    KEYWORD_TABLE.iter().find_map(|(spec, keywords)| {
        keywords
            .iter()
            .find(|keyword| lowered.contains(*keyword))
            .map(|keyword| (*spec, *keyword))
    })
}

/// Classifies `text` by first-match-wins keyword lookup, defaulting to
/// [`Specialization::GeneralPhysician`].
///
/// # Example
/// ```
/// use specialist::{classify, Specialization};
///
/// assert_eq!(classify("Sharp CHEST PAIN since morning"), Specialization::Cardiologist);
/// assert_eq!(classify("nothing relevant"), Specialization::GeneralPhysician);
/// ```
pub fn classify(text: &str) -> Specialization {
    match matched_keyword(text) {
        Some((spec, keyword)) => {
            debug!("Keyword '{}' matched {}", keyword, spec);
            spec
        }
        None => Specialization::DEFAULT,
    }
}
