pub mod classifier;
pub mod conversation_store;
pub mod metrics;
pub mod providers;
pub mod triage;

pub use conversation_store::{ConversationStore, StoreError};
pub use self::metrics::{get_metrics, init_metrics};
pub use triage::{Diagnosis, TriageService};
