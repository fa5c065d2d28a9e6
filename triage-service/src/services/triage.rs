//! Symptom triage pipeline: model first, keyword fallback second, then
//! disclaimer, log and respond.

use super::classifier::{classify_model_advice, fallback_advice, with_disclaimer};
use super::metrics::{record_assessment, record_model_failure};
use super::providers::{ChatModel, GenerationParams};
use super::ConversationStore;
use crate::models::{local_timestamp, AdviceSource, ConversationEntry, Severity};
use std::sync::Arc;

pub const SYSTEM_PROMPT: &str = r#"
You are a helpful healthcare assistant. Analyze the user's symptoms and provide appropriate guidance.

For MILD symptoms (common cold, mild headache, minor cuts):
- Provide home remedies and self-care advice
- Suggest over-the-counter treatments if appropriate
- Mark severity as "mild"

For SERIOUS symptoms (chest pain, severe fever >102°F, difficulty breathing, severe injuries):
- Recommend immediate medical attention
- Advise contacting a doctor or emergency services
- Mark severity as "serious"

Always include appropriate disclaimers about consulting healthcare professionals.
Be concise but helpful. Do not diagnose specific medical conditions.
"#;

/// Outcome of one triage request.
#[derive(Debug, Clone)]
pub struct Diagnosis {
    /// Advice with the disclaimer appended.
    pub advice: String,
    pub severity: Severity,
    pub source: AdviceSource,
    pub timestamp: String,
}

#[derive(Clone)]
pub struct TriageService {
    model: Option<Arc<dyn ChatModel>>,
    store: ConversationStore,
    params: GenerationParams,
}

impl TriageService {
    pub fn new(
        model: Option<Arc<dyn ChatModel>>,
        store: ConversationStore,
        params: GenerationParams,
    ) -> Self {
        Self {
            model,
            store,
            params,
        }
    }

    pub fn model_available(&self) -> bool {
        self.model.is_some()
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Produce advice for `symptoms` and record the exchange.
    ///
    /// Never fails: model errors fall back to keyword triage and log write
    /// errors are reported but do not withhold the advice.
    #[tracing::instrument(skip_all, fields(symptoms_len = symptoms.len()))]
    pub async fn diagnose(&self, symptoms: &str) -> Diagnosis {
        let (advice, severity, source) = self.assess(symptoms).await;
        let advice = with_disclaimer(&advice);
        let timestamp = local_timestamp();

        let entry = ConversationEntry {
            user: symptoms.to_string(),
            response: advice.clone(),
            severity,
            timestamp: timestamp.clone(),
        };
        if let Err(e) = self.store.append(entry).await {
            tracing::error!(error = %e, "Failed to save conversation");
        }

        record_assessment(severity.as_str(), source.as_str());
        tracing::info!(
            severity = %severity,
            source = source.as_str(),
            "Symptom triage completed"
        );

        Diagnosis {
            advice,
            severity,
            source,
            timestamp,
        }
    }

    async fn assess(&self, symptoms: &str) -> (String, Severity, AdviceSource) {
        if let Some(model) = &self.model {
            let user_prompt = format!("Symptoms: {}", symptoms);
            match model
                .complete(SYSTEM_PROMPT, &user_prompt, &self.params)
                .await
            {
                Ok(advice) => {
                    let severity = classify_model_advice(&advice);
                    return (advice, severity, AdviceSource::Model);
                }
                Err(e) => {
                    tracing::warn!(
                        model = model.model_name(),
                        error = %e,
                        "Chat model failed; using keyword fallback"
                    );
                    record_model_failure(e.kind());
                }
            }
        }

        let (advice, severity) = fallback_advice(symptoms);
        (advice.to_string(), severity, AdviceSource::Fallback)
    }
}
