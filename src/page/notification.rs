//! src/page/notification.rs

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl Default for NotificationKind {
    fn default() -> Self {
        NotificationKind::Info
    }
}

impl NotificationKind {
    /// Background colour. Only success and error have their own colour.
    pub fn color(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#38a169",
            NotificationKind::Error => "#e53e3e",
            NotificationKind::Warning | NotificationKind::Info => "#3182ce",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    pub visible: Duration,
    pub fade: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            visible: Duration::from_millis(4000),
            fade: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    Fading,
    Dismissed,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    shown_at: Instant,
}

impl Notification {
    pub fn phase(&self, timing: NotificationTiming, now: Instant) -> NotificationPhase {
        let elapsed = now.saturating_duration_since(self.shown_at);
        if elapsed < timing.visible {
            NotificationPhase::Visible
        } else if elapsed < timing.visible + timing.fade {
            NotificationPhase::Fading
        } else {
            NotificationPhase::Dismissed
        }
    }
}

/// Holds the single on-screen notification.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    timing: NotificationTiming,
    current: Option<Notification>,
}

impl NotificationCenter {
    pub fn new(timing: NotificationTiming) -> Self {
        Self {
            timing,
            current: None,
        }
    }

    pub fn timing(&self) -> NotificationTiming {
        self.timing
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.show_at(message, kind, Instant::now());
    }

    /// Replaces whatever is currently shown, without waiting for it to fade.
    pub fn show_at(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        let message = message.into();
        tracing::debug!(?kind, %message, "Showing notification");
        self.current = Some(Notification {
            message,
            kind,
            shown_at: now,
        });
    }

    pub fn phase(&self, now: Instant) -> Option<NotificationPhase> {
        self.current.as_ref().map(|n| n.phase(self.timing, now))
    }

    /// Drops the notification once it has fully faded out.
    pub fn sweep(&mut self, now: Instant) {
        if self.phase(now) == Some(NotificationPhase::Dismissed) {
            self.current = None;
        }
    }
}
