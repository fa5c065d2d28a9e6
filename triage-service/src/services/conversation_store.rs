//! Flat JSON conversation log.
//!
//! The whole document is read, extended and written back on every append.
//! Appends are serialised in-process; the write lands in a sibling temp file
//! that is renamed over the log so readers never see a half-written document.

use crate::models::{ConversationEntry, ConversationLog};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read conversation log {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Conversation log {path} is valid JSON but not a conversation document: {source}")]
    Unrecognized {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize conversation log: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write conversation log {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone)]
pub struct ConversationStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl ConversationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Read the log. Missing, unreadable or malformed files read as empty.
    pub async fn load(&self) -> ConversationLog {
        match self.read_document().await {
            Ok(log) => log.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Conversation log unavailable; treating as empty");
                ConversationLog::default()
            }
        }
    }

    /// Append one entry and rewrite the document.
    ///
    /// A file that is not JSON at all is replaced by a fresh document. A file
    /// that parses but has an unexpected shape, or cannot be read, is left
    /// alone and the append fails.
    pub async fn append(&self, entry: ConversationEntry) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut log = self.read_document().await?.unwrap_or_default();
        log.push(&entry)?;

        let body = serde_json::to_vec_pretty(&log)?;
        self.write_atomically(&body).await?;

        tracing::debug!(
            path = %self.path.display(),
            entries = log.len(),
            "Conversation log updated"
        );
        Ok(())
    }

    /// `Ok(None)` when there is no usable document to extend: the file is
    /// missing or is not valid JSON.
    async fn read_document(&self) -> Result<Option<ConversationLog>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let value: Value = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Conversation log is not valid JSON; ignoring its contents"
                );
                return Ok(None);
            }
        };

        serde_json::from_value(value)
            .map(Some)
            .map_err(|source| StoreError::Unrecognized {
                path: self.path.clone(),
                source,
            })
    }

    async fn write_atomically(&self, body: &[u8]) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "conversations.json".into());
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        tokio::fs::write(&tmp_path, body).await.map_err(write_err)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(write_err)
    }
}
