//! Request and response types for `/diagnose`.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Upper bound on accepted symptom text, in characters.
pub const MAX_SYMPTOMS_LEN: u64 = 4000;

/// Triage outcome. Serialised lowercase on the wire and in the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Serious,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Serious => "serious",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the advice text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceSource {
    Model,
    Fallback,
}

impl AdviceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceSource::Model => "model",
            AdviceSource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SymptomRequest {
    #[validate(
        length(max = MAX_SYMPTOMS_LEN, message = "Symptoms description is too long"),
        custom(function = "validate_not_blank")
    )]
    pub symptoms: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisResponse {
    pub advice: String,
    pub severity: Severity,
    pub timestamp: String,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Symptoms description cannot be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Local wall-clock time, ISO-8601 without offset, microsecond precision.
pub fn local_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Serious).unwrap(), "\"serious\"");
        let parsed: Severity = serde_json::from_str("\"mild\"").unwrap();
        assert_eq!(parsed, Severity::Mild);
    }

    #[test]
    fn blank_symptoms_fail_validation() {
        let request = SymptomRequest {
            symptoms: "   \n\t".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("symptoms"));
    }

    #[test]
    fn oversized_symptoms_fail_validation() {
        let request = SymptomRequest {
            symptoms: "a".repeat(MAX_SYMPTOMS_LEN as usize + 1),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn symptoms_at_the_length_limit_pass_validation() {
        let request = SymptomRequest {
            symptoms: "a".repeat(MAX_SYMPTOMS_LEN as usize),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn ordinary_symptoms_pass_validation() {
        let request = SymptomRequest {
            symptoms: "mild headache since this morning".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn timestamp_has_microsecond_precision_and_no_offset() {
        let ts = local_timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%dT%H:%M:%S%.6f").is_ok());
        assert_eq!(ts.split('.').nth(1).map(str::len), Some(6));
    }
}
