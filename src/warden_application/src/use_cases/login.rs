use secrecy::Secret;
use warden_core::{
    CredentialStore, CredentialStoreError, Email, PasswordHasher, SessionIssuer,
    SessionIssuerError, SessionToken, TotpEngine,
};

/// Error types specific to the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Invalid one-time code")]
    InvalidOtp,
    #[error("Credential store error: {0}")]
    StoreError(CredentialStoreError),
    #[error("Session issuer error: {0}")]
    SessionError(#[from] SessionIssuerError),
}

/// Login use case - the authority for session issuance.
///
/// Credentials are verified here in full even when a pre-login check already
/// ran; the precheck is only a UI hint and no pending-login state is kept
/// between the two calls. For users with two-factor active a valid one-time
/// code must arrive together with the credentials. A missing or wrong code
/// after an accepted password is reported as `InvalidOtp` so the client can
/// re-prompt for the code alone; every earlier failure collapses into the
/// generic `InvalidCredentials`.
pub struct LoginUseCase<'a, C, H, T, S>
where
    C: CredentialStore,
    H: PasswordHasher,
    T: TotpEngine,
    S: SessionIssuer,
{
    credential_store: &'a C,
    password_hasher: &'a H,
    totp_engine: &'a T,
    session_issuer: &'a S,
}

impl<'a, C, H, T, S> LoginUseCase<'a, C, H, T, S>
where
    C: CredentialStore,
    H: PasswordHasher,
    T: TotpEngine,
    S: SessionIssuer,
{
    pub fn new(
        credential_store: &'a C,
        password_hasher: &'a H,
        totp_engine: &'a T,
        session_issuer: &'a S,
    ) -> Self {
        Self {
            credential_store,
            password_hasher,
            totp_engine,
            session_issuer,
        }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password, otp_code))]
    pub async fn execute(
        &self,
        email: Email,
        password: Secret<String>,
        otp_code: Option<String>,
    ) -> Result<SessionToken, LoginError> {
        let user = match self.credential_store.find_user_by_email(&email).await {
            Ok(user) => user,
            Err(CredentialStoreError::UserNotFound) => return Err(LoginError::InvalidCredentials),
            Err(e) => return Err(LoginError::StoreError(e)),
        };

        if !self
            .password_hasher
            .verify(&password, user.password_digest())
            .await
        {
            return Err(LoginError::InvalidCredentials);
        }

        if user.two_factor_activated() {
            let Some(secret) = user.two_factor_secret() else {
                return Err(LoginError::StoreError(CredentialStoreError::UnexpectedError(
                    "two-factor activated without a secret".to_string(),
                )));
            };

            // An absent code checks as the empty string and fails closed.
            let code = otp_code.as_deref().unwrap_or_default();
            if !self.totp_engine.check(code, secret) {
                return Err(LoginError::InvalidOtp);
            }
        }

        let session = self.session_issuer.establish(user.id(), user.email()).await?;

        Ok(session)
    }
}
