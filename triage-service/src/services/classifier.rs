//! Keyword triage used when the language model is unavailable, plus the
//! severity heuristic applied to model output.
//!
//! All matching is plain substring search over the lowercased text, so
//! "breathless" matches `breath` and "forehead" matches `head`.

use crate::models::Severity;

/// Appended to every piece of advice, whatever produced it.
pub const DISCLAIMER: &str = "\n\n⚠️ Disclaimer: This advice is for informational purposes only and does not replace professional medical consultation. Please consult a qualified healthcare provider for proper diagnosis and treatment.";

pub const MILD_HEADACHE: &str = "For mild headaches, try: Rest in a quiet, dark room; Stay hydrated; Apply a cold or warm compress to your head; Consider over-the-counter pain relievers like ibuprofen or acetaminophen. If headaches persist or worsen, consult a healthcare provider.";

pub const MILD_COLD: &str = "For common cold symptoms: Get plenty of rest; Stay hydrated with water, warm tea, or clear broths; Use a humidifier or breathe steam from a hot shower; Gargle with warm salt water for sore throat. Most cold symptoms resolve within 7-10 days. Consult a doctor if symptoms worsen or persist beyond 10 days.";

pub const MILD_FEVER: &str = "For mild fever (under 102°F): Rest and stay hydrated; Use over-the-counter fever reducers like acetaminophen or ibuprofen; Dress lightly and use cool compresses; Monitor temperature regularly. Seek medical attention if fever exceeds 102°F, persists more than 3 days, or is accompanied by severe symptoms.";

pub const MILD_DEFAULT: &str = "Based on your symptoms, here are some general recommendations: Get adequate rest; Stay well-hydrated; Monitor your symptoms; Consider over-the-counter remedies if appropriate. However, if symptoms worsen, persist, or you have concerns, please consult with a healthcare professional for proper evaluation and treatment.";

pub const SERIOUS_CHEST: &str = "⚠️ CHEST PAIN requires immediate medical attention. Please contact emergency services (911) or go to the nearest emergency room immediately. Do not delay seeking medical care for chest pain.";

pub const SERIOUS_BREATHING: &str = "⚠️ DIFFICULTY BREATHING is a serious symptom. Seek immediate medical attention by calling emergency services (911) or going to the nearest emergency room. This requires urgent evaluation by healthcare professionals.";

pub const SERIOUS_SEVERE: &str = "⚠️ Based on your symptoms, this appears to require immediate medical attention. Please contact emergency services (911) or go to the nearest emergency room right away. Do not delay seeking professional medical care.";

pub const SERIOUS_DEFAULT: &str = "⚠️ Your symptoms suggest you should seek medical attention promptly. Please contact your healthcare provider, urgent care center, or emergency services if symptoms are severe. Professional medical evaluation is recommended.";

const SERIOUS_SYMPTOM_KEYWORDS: &[&str] = &[
    "chest pain",
    "chest",
    "breathing",
    "breath",
    "severe",
    "emergency",
    "unconscious",
    "bleeding heavily",
];

const COLD_KEYWORDS: &[&str] = &["cold", "cough", "runny nose"];

const MILD_INDICATORS: &[&str] = &["mild", "slight", "little", "minor"];

/// Words in model output that mean the user was told to get care.
const SERIOUS_ADVICE_KEYWORDS: &[&str] = &[
    "doctor",
    "emergency",
    "hospital",
    "serious",
    "severe",
    "immediate",
    "urgent",
    "medical attention",
    "911",
    "seek care",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Pick a canned response for free-text symptoms.
///
/// Serious keywords win over mild ones, and text that matches nothing is
/// treated as serious.
pub fn fallback_advice(symptoms: &str) -> (&'static str, Severity) {
    let symptoms = symptoms.to_lowercase();

    if contains_any(&symptoms, SERIOUS_SYMPTOM_KEYWORDS) {
        let advice = if symptoms.contains("chest") {
            SERIOUS_CHEST
        } else if symptoms.contains("breath") {
            SERIOUS_BREATHING
        } else {
            SERIOUS_SEVERE
        };
        return (advice, Severity::Serious);
    }

    if symptoms.contains("headache") || symptoms.contains("head") {
        (MILD_HEADACHE, Severity::Mild)
    } else if contains_any(&symptoms, COLD_KEYWORDS) {
        (MILD_COLD, Severity::Mild)
    } else if symptoms.contains("fever") && symptoms.contains("mild") {
        (MILD_FEVER, Severity::Mild)
    } else if contains_any(&symptoms, MILD_INDICATORS) {
        (MILD_DEFAULT, Severity::Mild)
    } else {
        (SERIOUS_DEFAULT, Severity::Serious)
    }
}

/// Severity of free-form model advice.
pub fn classify_model_advice(advice: &str) -> Severity {
    if contains_any(&advice.to_lowercase(), SERIOUS_ADVICE_KEYWORDS) {
        Severity::Serious
    } else {
        Severity::Mild
    }
}

pub fn with_disclaimer(advice: &str) -> String {
    let mut out = String::with_capacity(advice.len() + DISCLAIMER.len());
    out.push_str(advice);
    out.push_str(DISCLAIMER);
    out
}
