use secrecy::Secret;
use serde_aux::prelude::deserialize_number_from_string;

use crate::page::NotificationTiming;

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other,
            )),
        }
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

/// Credentials and rendering options for the transactional email relay.
#[derive(serde::Deserialize, Clone)]
pub struct EmailRelaySettings {
    pub base_url: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub send_timeout_ms: u64,
    pub subject_prefix: String,
    /// Fixed UTC offset, in hours, used for the `dateTime` template parameter.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub dispatch_offset_hours: i32,
    /// Address offered to the visitor when a send fails for an unknown reason.
    pub fallback_contact: String,
}

impl EmailRelaySettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.send_timeout_ms)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct MessageStoreSettings {
    pub base_url: String,
    pub project_id: String,
    pub api_key: Secret<String>,
    pub collection: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub write_timeout_ms: u64,
}

impl MessageStoreSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.write_timeout_ms)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct NotificationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub visible_ms: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub fade_ms: u64,
}

impl NotificationSettings {
    pub fn timing(&self) -> NotificationTiming {
        NotificationTiming {
            visible: std::time::Duration::from_millis(self.visible_ms),
            fade: std::time::Duration::from_millis(self.fade_ms),
        }
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct Configuration {
    pub app: AppConfig,
    pub email_relay: EmailRelaySettings,
    pub message_store: MessageStoreSettings,
    pub notification: NotificationSettings,
}

pub fn get_configuration() -> Result<Configuration, config::ConfigError> {
    let mut settings = config::Config::default();

    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");

    // Defaults shared by every environment.
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;

    // e.g. `APP_EMAIL_RELAY__PUBLIC_KEY=...` overrides `email_relay.public_key`.
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    settings.try_into()
}

#[cfg(test)]
mod tests {
    use claim::{assert_err, assert_ok};

    use super::Environment;

    #[test]
    fn environment_names_are_case_insensitive() {
        assert_ok!(Environment::try_from("Production".to_string()));
        assert_ok!(Environment::try_from("LOCAL".to_string()));
    }

    #[test]
    fn unknown_environment_is_rejected() {
        assert_err!(Environment::try_from("staging".to_string()));
    }
}
