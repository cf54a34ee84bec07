//! src/mail/emailjs.rs

use reqwest::Client;
use secrecy::ExposeSecret;

use crate::config::EmailRelaySettings;
use crate::mail::{EmailRelay, RelayReceipt, SendError, TemplateParams};

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// Client for the EmailJS REST API.
pub struct EmailJsClient {
    http_client: Client,
    settings: EmailRelaySettings,
}

impl EmailJsClient {
    pub fn new(settings: EmailRelaySettings) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(settings.timeout()).build()?;
        Ok(Self {
            http_client,
            settings,
        })
    }

    pub fn settings(&self) -> &EmailRelaySettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl EmailRelay for EmailJsClient {
    #[tracing::instrument(name = "Sending email through the relay", skip(self, params))]
    async fn send(&self, params: &TemplateParams) -> Result<RelayReceipt, SendError> {
        let url = format!("{}/api/v1.0/email/send", self.settings.base_url);
        let request_body = SendEmailRequest {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: self.settings.public_key.expose_secret(),
            template_params: params,
        };

        tracing::debug!(
            service_id = %self.settings.service_id,
            template_id = %self.settings.template_id,
            "Dispatching template"
        );
        let response = self
            .http_client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Email relay could not be reached: {:?}", e);
                SendError::Transport(Box::new(e))
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(status = status.as_u16(), "Email relay accepted the message");
            return Ok(RelayReceipt {
                status: status.as_u16(),
            });
        }

        // The relay explains rejections in a plain-text body.
        let detail = response.text().await.unwrap_or_default();
        let error = SendError::from_status(status.as_u16(), detail);
        tracing::error!("Email relay rejected the message: {:?}", error);
        Err(error)
    }
}
