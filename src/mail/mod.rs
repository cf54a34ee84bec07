mod email_relay;
mod emailjs;
mod template;

pub use email_relay::{EmailRelay, RelayReceipt, SendError};
pub use emailjs::EmailJsClient;
pub use template::{format_dispatch_time, TemplateParams};
