//! src/domain/contact_submission.rs

use crate::domain::ContactEmail;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid email: {0}")]
    InvalidEmail(String),
}

impl ValidationError {
    /// Message shown to the visitor.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "Please fill in all fields",
            ValidationError::InvalidEmail(_) => "Please enter a valid email address",
        }
    }
}

/// A contact message that passed local validation and is ready to be sent.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: String,
    pub email: ContactEmail,
    pub subject: String,
    pub message: String,
}
