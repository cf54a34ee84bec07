//! In-memory model of the contact section of the page: the form, its submit
//! button and the notification slot.

mod button;
mod notification;

pub use button::{ButtonLock, SubmitButton, BUSY_LABEL, DEFAULT_SUBMIT_LABEL};
pub use notification::{
    Notification, NotificationCenter, NotificationKind, NotificationPhase, NotificationTiming,
};

use crate::domain::ContactForm;

#[derive(Debug, Clone, Default)]
pub struct ContactPage {
    pub form: ContactForm,
    pub submit_button: SubmitButton,
    pub notifications: NotificationCenter,
}

impl ContactPage {
    pub fn new(form: ContactForm, timing: NotificationTiming) -> Self {
        Self {
            form,
            submit_button: SubmitButton::default(),
            notifications: NotificationCenter::new(timing),
        }
    }
}
