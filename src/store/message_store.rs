//! src/store/message_store.rs

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::ContactSubmission;
use crate::utils::error_chain_fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Unread,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Unread => "unread",
        }
    }
}

/// A contact message as persisted after its email went out. The store adds
/// its own `timestamp` on write.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: MessageStatus,
    pub date_created: String,
    pub email_sent: bool,
}

impl MessageRecord {
    pub fn delivered(submission: &ContactSubmission, created_at: DateTime<Utc>) -> Self {
        Self {
            name: submission.name.clone(),
            email: submission.email.as_ref().to_owned(),
            subject: submission.subject.clone(),
            message: submission.message.clone(),
            status: MessageStatus::Unread,
            date_created: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            email_sent: true,
        }
    }
}

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("Failed to reach the document store.")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("The document store rejected the write with status {status}: {detail}")]
    Rejected { status: u16, detail: String },
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[async_trait::async_trait]
pub trait MessageStore: Send + Sync {
    /// Inserts `record` as a new document and returns the identifier the
    /// store gave it.
    async fn insert(&self, record: &MessageRecord) -> Result<String, StoreError>;
}
