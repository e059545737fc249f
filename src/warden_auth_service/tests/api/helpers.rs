use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use secrecy::{ExposeSecret, Secret};
use totp_rs::{Algorithm, Secret as TotpRsSecret, TOTP};

use warden_adapters::{
    Argon2PasswordHasher, InMemoryCredentialStore, JwtSessionConfig, JwtSessionIssuer,
    MockEmailClient, TotpRsEngine,
};
use warden_auth_service::{AuthConfig, AuthService};
use warden_core::{PasswordPolicy, TotpSecret};

pub type TestAuthService = AuthService<
    InMemoryCredentialStore,
    Argon2PasswordHasher,
    TotpRsEngine,
    MockEmailClient,
    JwtSessionIssuer,
>;

pub struct TestApp {
    pub service: TestAuthService,
    pub email_client: MockEmailClient,
}

pub fn spawn_service() -> TestApp {
    let email_client = MockEmailClient::new();
    let service = AuthService::new(
        InMemoryCredentialStore::new(),
        Argon2PasswordHasher::new(),
        TotpRsEngine::new(),
        email_client.clone(),
        JwtSessionIssuer::new(JwtSessionConfig {
            jwt_secret: Secret::from("test-jwt-secret".to_string()),
            token_ttl_in_seconds: 600,
        }),
        AuthConfig {
            site_base_url: "https://warden.example.com".to_string(),
            totp_issuer: "Warden".to_string(),
            password_policy: PasswordPolicy::default(),
        },
    );

    TestApp {
        service,
        email_client,
    }
}

pub fn random_email() -> Secret<String> {
    let email: String = SafeEmail().fake();
    Secret::from(email)
}

pub fn secret(raw: &str) -> Secret<String> {
    Secret::from(raw.to_string())
}

/// Pulls the reset token back out of the captured reset email.
pub async fn extract_reset_token(email_client: &MockEmailClient) -> String {
    let sent = email_client.sent().await;
    let content = &sent.last().expect("a reset email was sent").content;
    let marker = "token=";
    let start = content.find(marker).expect("link contains a token") + marker.len();
    content[start..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect()
}

/// Generates the code an authenticator app would currently show for the
/// enrolled secret, using the same RFC 6238 parameters as the engine.
pub fn totp_code_for(secret: &TotpSecret) -> String {
    let bytes = TotpRsSecret::Encoded(secret.as_ref().expose_secret().clone())
        .to_bytes()
        .unwrap();
    TOTP::new(Algorithm::SHA1, 6, 1, 30, bytes, None, "account".to_string())
        .unwrap()
        .generate_current()
        .unwrap()
}
