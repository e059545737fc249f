use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use warden_core::PasswordPolicy;

/// Runtime configuration.
///
/// Loaded from `configuration/base.json` (if present) with environment
/// overrides: `WARDEN_APPLICATION__SITE_BASE_URL`, `WARDEN_DATABASE__URL`
/// and so on. A `.env` file is honored for local development.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub email_client: EmailClientSettings,
    pub session: SessionSettings,
    #[serde(default)]
    pub password_policy: PasswordPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    /// Base URL reset links are built from.
    pub site_base_url: String,
    /// Issuer label shown by authenticator apps.
    pub totp_issuer: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub authorization_token: Secret<String>,
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl Settings {
    pub fn load() -> Result<Settings, ConfigError> {
        dotenvy::dotenv().ok();

        let base_path =
            std::env::current_dir().map_err(|e| ConfigError::Message(e.to_string()))?;
        let configuration_dir = base_path.join("configuration");

        Config::builder()
            .add_source(File::from(configuration_dir.join("base.json")).required(false))
            .add_source(
                Environment::with_prefix("WARDEN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
