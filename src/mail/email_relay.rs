//! src/mail/email_relay.rs

use crate::mail::TemplateParams;
use crate::utils::error_chain_fmt;

/// What the relay handed back for an accepted send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayReceipt {
    pub status: u16,
}

impl RelayReceipt {
    /// Only a plain `200` counts as delivered.
    pub fn is_delivered(&self) -> bool {
        self.status == 200
    }
}

#[derive(thiserror::Error)]
pub enum SendError {
    #[error("Failed to reach the email relay.")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("The email relay refused our credentials (status {0}).")]
    Authorization(u16),
    #[error("The email relay rejected the template configuration: {0}")]
    Configuration(String),
    #[error("The email relay answered with status {status}: {detail}")]
    Unclassified { status: u16, detail: String },
}

impl std::fmt::Debug for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl SendError {
    /// Classifies a response the relay did not accept.
    pub fn from_status(status: u16, detail: String) -> Self {
        match status {
            400 => SendError::Configuration(detail),
            401 | 403 => SendError::Authorization(status),
            _ => SendError::Unclassified { status, detail },
        }
    }

    /// Guidance shown to the visitor; `fallback_contact` is offered when
    /// nothing more specific can be said.
    pub fn user_message(&self, fallback_contact: &str) -> String {
        let guidance = match self {
            SendError::Transport(_) => "Please check your internet connection.".to_string(),
            SendError::Configuration(_) => {
                "Invalid template configuration. Please contact the administrator.".to_string()
            }
            SendError::Authorization(_) => {
                "Email service authentication failed. Please contact the administrator."
                    .to_string()
            }
            SendError::Unclassified { .. } => format!(
                "Please try again or contact directly via email at {}",
                fallback_contact
            ),
        };
        format!("Failed to send message. {}", guidance)
    }
}

#[async_trait::async_trait]
pub trait EmailRelay: Send + Sync {
    /// Sends one templated email. Any 2xx answer is a receipt; everything
    /// else is classified into a [`SendError`].
    async fn send(&self, params: &TemplateParams) -> Result<RelayReceipt, SendError>;
}
