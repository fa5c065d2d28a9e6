//! On-disk conversation log document.

use super::Severity;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One recorded interaction, as this service writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// Symptom text as submitted.
    pub user: String,
    /// Advice returned, disclaimer included.
    pub response: String,
    pub severity: Severity,
    pub timestamp: String,
}

/// The whole log file; also the body of `GET /history`.
///
/// Entries are kept as raw JSON so that records written by other tools, or
/// edited by hand, survive a rewrite untouched. The same goes for any
/// top-level keys besides `conversations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationLog {
    #[serde(default)]
    pub conversations: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConversationLog {
    pub fn push(&mut self, entry: &ConversationEntry) -> Result<(), serde_json::Error> {
        self.conversations.push(serde_json::to_value(entry)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
