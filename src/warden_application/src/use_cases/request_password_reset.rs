use warden_core::{
    CredentialStore, CredentialStoreError, Email, EmailClient, PasswordResetToken,
};

use secrecy::ExposeSecret;

const RESET_EMAIL_SUBJECT: &str = "Your password reset request";

/// Error types specific to the password reset request use case
#[derive(Debug, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("Credential store error: {0}")]
    StoreError(CredentialStoreError),
    #[error("Failed to send email: {0}")]
    EmailError(String),
}

/// Password reset request use case.
///
/// For an unknown address this succeeds without doing anything, so the
/// response never reveals whether an account exists; the boundary renders
/// the same "check your email" message either way. For a known address a
/// fresh token is upserted keyed by user id - replacing any outstanding
/// token, so earlier reset links die the moment a new one is requested -
/// and the reset link is dispatched through the notifier.
pub struct RequestPasswordResetUseCase<'a, C, E>
where
    C: CredentialStore,
    E: EmailClient,
{
    credential_store: &'a C,
    email_client: &'a E,
    site_base_url: &'a str,
}

impl<'a, C, E> RequestPasswordResetUseCase<'a, C, E>
where
    C: CredentialStore,
    E: EmailClient,
{
    pub fn new(credential_store: &'a C, email_client: &'a E, site_base_url: &'a str) -> Self {
        Self {
            credential_store,
            email_client,
            site_base_url,
        }
    }

    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), RequestPasswordResetError> {
        let user = match self.credential_store.find_user_by_email(&email).await {
            Ok(user) => user,
            Err(CredentialStoreError::UserNotFound) => {
                tracing::debug!("password reset requested for unknown address");
                return Ok(());
            }
            Err(e) => return Err(RequestPasswordResetError::StoreError(e)),
        };

        let token = PasswordResetToken::issue(user.id());
        let reset_link = format!(
            "{}/update-password?token={}",
            self.site_base_url,
            token.token()
        );

        self.credential_store
            .upsert_reset_token(token)
            .await
            .map_err(RequestPasswordResetError::StoreError)?;

        let address = email.as_ref().expose_secret();
        let content = format!(
            "Hey, {address}! You requested to reset your password.<br/>\
             Here's your password reset link. This link will expire in 1 hour:<br/>\
             <a href=\"{reset_link}\">{reset_link}</a>"
        );

        self.email_client
            .send_email(&email, RESET_EMAIL_SUBJECT, &content)
            .await
            .map_err(|e| {
                tracing::error!("failed to deliver password reset email: {e}");
                RequestPasswordResetError::EmailError(e)
            })?;

        Ok(())
    }
}
