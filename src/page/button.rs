//! src/page/button.rs

pub const DEFAULT_SUBMIT_LABEL: &str = "Send Message";
pub const BUSY_LABEL: &str = "Sending...";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubmitButton {
    label: String,
    enabled: bool,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_LABEL)
    }
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disables the button and shows `busy_label` until the returned guard
    /// is dropped.
    pub fn lock(&mut self, busy_label: &str) -> ButtonLock<'_> {
        let original_label = std::mem::replace(&mut self.label, busy_label.to_string());
        self.enabled = false;
        ButtonLock {
            button: self,
            original_label,
        }
    }
}

/// Restores the label and re-enables the button on drop, whichever way the
/// submission ends.
#[must_use = "the button is restored as soon as the lock is dropped"]
pub struct ButtonLock<'a> {
    button: &'a mut SubmitButton,
    original_label: String,
}

impl ButtonLock<'_> {
    pub fn label(&self) -> &str {
        &self.button.label
    }
}

impl Drop for ButtonLock<'_> {
    fn drop(&mut self) {
        self.button.label = std::mem::take(&mut self.original_label);
        self.button.enabled = true;
    }
}
