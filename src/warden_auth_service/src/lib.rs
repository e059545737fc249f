pub mod auth_service;
pub mod telemetry;

pub use auth_service::{AuthConfig, AuthService, AuthServiceError};
pub use telemetry::init_tracing;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use warden_adapters::config::DatabaseSettings;

/// Connects to Postgres and applies the credential-store migrations.
pub async fn configure_postgresql(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .connect(settings.url.expose_secret())
        .await?;

    sqlx::migrate!("../warden_adapters/migrations")
        .run(&pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;

    Ok(pool)
}
