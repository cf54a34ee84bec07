//! Runs one contact-form submission end to end: validation, email dispatch,
//! conditional persistence, and what the visitor gets to see afterwards.

use chrono::{DateTime, Utc};

use crate::config::EmailRelaySettings;
use crate::domain::{ContactSubmission, ValidationError};
use crate::mail::{EmailRelay, SendError, TemplateParams};
use crate::page::{ContactPage, NotificationKind, BUSY_LABEL};
use crate::store::{MessageRecord, MessageStore, StoreError};

pub const DELIVERED_MESSAGE: &str = "Message sent successfully! We will get back to you soon.";
pub const NOT_SAVED_MESSAGE: &str = "Message sent but could not save to database.";

/// The parts of the relay configuration the coordinator renders with.
#[derive(Debug, Clone)]
pub struct SubmissionSettings {
    pub subject_prefix: String,
    pub dispatch_offset_hours: i32,
    pub fallback_contact: String,
}

impl From<&EmailRelaySettings> for SubmissionSettings {
    fn from(settings: &EmailRelaySettings) -> Self {
        Self {
            subject_prefix: settings.subject_prefix.clone(),
            dispatch_offset_hours: settings.dispatch_offset_hours,
            fallback_contact: settings.fallback_contact.clone(),
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    /// The form was incomplete or malformed; nothing left the page.
    Rejected(ValidationError),
    /// Email delivered and message saved.
    Delivered,
    /// Email delivered, but the store write failed.
    DeliveredNotSaved(StoreError),
    /// The email itself could not be delivered.
    Failed(SendError),
}

impl Outcome {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Outcome::Delivered => NotificationKind::Success,
            Outcome::DeliveredNotSaved(_) => NotificationKind::Warning,
            Outcome::Rejected(_) | Outcome::Failed(_) => NotificationKind::Error,
        }
    }

    pub fn user_message(&self, fallback_contact: &str) -> String {
        match self {
            Outcome::Rejected(e) => e.user_message().to_string(),
            Outcome::Delivered => DELIVERED_MESSAGE.to_string(),
            Outcome::DeliveredNotSaved(_) => NOT_SAVED_MESSAGE.to_string(),
            Outcome::Failed(e) => e.user_message(fallback_contact),
        }
    }

    /// The form is cleared once the email went out, saved or not.
    pub fn clears_form(&self) -> bool {
        matches!(self, Outcome::Delivered | Outcome::DeliveredNotSaved(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Rejected(_) => "rejected",
            Outcome::Delivered => "success",
            Outcome::DeliveredNotSaved(_) => "warning",
            Outcome::Failed(_) => "error",
        }
    }
}

pub struct SubmissionCoordinator<R, S> {
    relay: R,
    store: S,
    settings: SubmissionSettings,
}

impl<R, S> SubmissionCoordinator<R, S>
where
    R: EmailRelay,
    S: MessageStore,
{
    pub fn new(relay: R, store: S, settings: SubmissionSettings) -> Self {
        Self {
            relay,
            store,
            settings,
        }
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn submit(&self, page: &mut ContactPage) -> Outcome {
        self.submit_at(page, Utc::now()).await
    }

    /// Submits the form currently on `page`, using `now` for every timestamp
    /// the submission carries.
    #[tracing::instrument(
        name = "Submitting a contact message",
        skip(self, page, now),
        fields(
            sender_email = %page.form.email,
            sender_name = %page.form.name,
        )
    )]
    pub async fn submit_at(&self, page: &mut ContactPage, now: DateTime<Utc>) -> Outcome {
        let submission = match page.form.to_submission() {
            Ok(submission) => submission,
            Err(e) => {
                tracing::warn!("Contact form failed validation: {}", e);
                let outcome = Outcome::Rejected(e);
                page.notifications
                    .show(outcome.user_message(&self.settings.fallback_contact), outcome.kind());
                return outcome;
            }
        };

        let _lock = page.submit_button.lock(BUSY_LABEL);

        let outcome = self.deliver(&submission, now).await;
        match &outcome {
            Outcome::Delivered => tracing::info!("Contact message delivered and saved"),
            Outcome::DeliveredNotSaved(e) => {
                tracing::warn!("Contact message delivered but not saved: {:?}", e)
            }
            Outcome::Failed(e) => tracing::error!("Contact message not delivered: {:?}", e),
            Outcome::Rejected(_) => {}
        }

        page.notifications
            .show(outcome.user_message(&self.settings.fallback_contact), outcome.kind());
        if outcome.clears_form() {
            page.form.reset();
        }
        outcome
    }

    async fn deliver(&self, submission: &ContactSubmission, now: DateTime<Utc>) -> Outcome {
        let params = TemplateParams::render(
            submission,
            &self.settings.subject_prefix,
            self.settings.dispatch_offset_hours,
            now,
        );

        let receipt = match self.relay.send(&params).await {
            Ok(receipt) => receipt,
            Err(e) => return Outcome::Failed(e),
        };
        if !receipt.is_delivered() {
            return Outcome::Failed(SendError::from_status(
                receipt.status,
                "the relay did not confirm delivery".into(),
            ));
        }

        let record = MessageRecord::delivered(submission, now);
        match self.store.insert(&record).await {
            Ok(_) => Outcome::Delivered,
            Err(e) => Outcome::DeliveredNotSaved(e),
        }
    }
}
