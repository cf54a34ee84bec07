//! src/domain/contact_form.rs

use crate::domain::{ContactEmail, ContactSubmission, ValidationError};

/// Raw values of the contact form fields, as typed by the visitor.
///
/// Absent keys deserialize to empty strings so that they surface as a
/// missing field rather than as a malformed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.subject.is_empty()
            && self.message.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Presence is checked for every field before the email pattern, so an
    /// empty email reports a missing field. Whitespace-only values count as
    /// present.
    pub fn to_submission(&self) -> Result<ContactSubmission, ValidationError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }

        Ok(ContactSubmission {
            name: self.name.clone(),
            email: ContactEmail::parse(self.email.clone())?,
            subject: self.subject.clone(),
            message: self.message.clone(),
        })
    }
}
