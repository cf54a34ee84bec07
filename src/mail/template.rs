//! src/mail/template.rs

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::domain::ContactSubmission;

/// Parameters substituted into the relay-side email template.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(rename = "dateTime")]
    pub date_time: String,
    pub reply_to: String,
}

impl TemplateParams {
    pub fn render(
        submission: &ContactSubmission,
        subject_prefix: &str,
        offset_hours: i32,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            from_name: submission.name.clone(),
            name: submission.name.clone(),
            email: submission.email.as_ref().to_owned(),
            subject: format!("{}{}", subject_prefix, submission.subject),
            message: submission.message.clone(),
            date_time: format_dispatch_time(sent_at, offset_hours),
            reply_to: submission.email.as_ref().to_owned(),
        }
    }
}

/// Renders `at` in a fixed UTC offset the way an en-US browser would, e.g.
/// `Oct 18, 2026, 03:04 PM GMT+8`. Offsets outside +/-23 hours fall back to
/// UTC.
pub fn format_dispatch_time(at: DateTime<Utc>, offset_hours: i32) -> String {
    let (offset, offset_hours) = match offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
    {
        Some(offset) => (offset, offset_hours),
        None => (Utc.fix(), 0),
    };
    let suffix = match offset_hours {
        0 => "GMT".to_string(),
        h if h > 0 => format!("GMT+{}", h),
        h => format!("GMT{}", h),
    };
    format!(
        "{} {}",
        at.with_timezone(&offset).format("%b %-d, %Y, %I:%M %p"),
        suffix,
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{format_dispatch_time, TemplateParams};
    use crate::domain::{ContactEmail, ContactSubmission};

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ursula".into(),
            email: ContactEmail::parse("ursula@example.com".into()).unwrap(),
            subject: "Hello".into(),
            message: "A message".into(),
        }
    }

    #[test]
    fn dispatch_time_is_rendered_in_the_configured_offset() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 7, 4, 0).unwrap();
        assert_eq!(format_dispatch_time(at, 8), "Oct 18, 2026, 03:04 PM GMT+8");
    }

    #[test]
    fn dispatch_time_handles_negative_offsets_and_day_rollover() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 2, 30, 0).unwrap();
        assert_eq!(format_dispatch_time(at, -5), "Dec 31, 2025, 09:30 PM GMT-5");
    }

    #[test]
    fn out_of_range_offsets_fall_back_to_utc() {
        let at = Utc.with_ymd_and_hms(2026, 3, 9, 0, 15, 0).unwrap();
        assert_eq!(format_dispatch_time(at, 30), "Mar 9, 2026, 12:15 AM GMT");
    }

    #[test]
    fn template_params_mirror_the_sender_and_prefix_the_subject() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 7, 4, 0).unwrap();
        let params = TemplateParams::render(&submission(), "Contact Us: ", 8, at);

        assert_eq!(params.from_name, "Ursula");
        assert_eq!(params.name, "Ursula");
        assert_eq!(params.reply_to, "ursula@example.com");
        assert_eq!(params.subject, "Contact Us: Hello");

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["dateTime"], "Oct 18, 2026, 03:04 PM GMT+8");
        assert!(json.get("date_time").is_none());
    }
}
