use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::coordinator::{Outcome, SubmissionCoordinator};
use crate::domain::ContactForm;
use crate::mail::EmailJsClient;
use crate::page::{ContactPage, NotificationKind, NotificationTiming, SubmitButton};
use crate::store::FirestoreStore;

pub type ContactCoordinator = SubmissionCoordinator<EmailJsClient, FirestoreStore>;

#[derive(serde::Serialize)]
pub struct NotificationView {
    message: String,
    kind: NotificationKind,
    color: &'static str,
    visible_ms: u64,
    fade_ms: u64,
}

/// State of the contact section once the submission has run.
#[derive(serde::Serialize)]
pub struct ContactPageView {
    outcome: &'static str,
    notification: Option<NotificationView>,
    form: ContactForm,
    submit: SubmitButton,
}

impl ContactPageView {
    fn new(outcome: &Outcome, page: ContactPage) -> Self {
        let timing = page.notifications.timing();
        let notification = page.notifications.current().map(|n| NotificationView {
            message: n.message.clone(),
            kind: n.kind,
            color: n.kind.color(),
            visible_ms: timing.visible.as_millis() as u64,
            fade_ms: timing.fade.as_millis() as u64,
        });
        Self {
            outcome: outcome.as_str(),
            notification,
            form: page.form,
            submit: page.submit_button,
        }
    }
}

fn status_code(outcome: &Outcome) -> StatusCode {
    match outcome {
        Outcome::Delivered | Outcome::DeliveredNotSaved(_) => StatusCode::OK,
        Outcome::Rejected(_) => StatusCode::BAD_REQUEST,
        Outcome::Failed(_) => StatusCode::BAD_GATEWAY,
    }
}

#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(form, coordinator, timing)
)]
pub async fn contact(
    form: web::Form<ContactForm>,
    coordinator: web::Data<ContactCoordinator>,
    timing: web::Data<NotificationTiming>,
) -> HttpResponse {
    let mut page = ContactPage::new(form.0, *timing.get_ref());
    let outcome = coordinator.submit(&mut page).await;

    HttpResponse::build(status_code(&outcome)).json(ContactPageView::new(&outcome, page))
}
