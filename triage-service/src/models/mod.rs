//! Domain models for the triage service.

pub mod conversation;
pub mod diagnosis;

pub use conversation::{ConversationEntry, ConversationLog};
pub use diagnosis::{local_timestamp, AdviceSource, DiagnosisResponse, Severity, SymptomRequest};
