use warden_core::{
    CredentialStore, CredentialStoreError, TotpEngine, TotpEngineError, TotpSecret, UserId,
};

/// Material handed to the enrolling user: the shared secret plus the
/// `otpauth://` URI the UI renders as a QR code.
#[derive(Debug)]
pub struct TwoFactorEnrollment {
    pub secret: TotpSecret,
    pub provisioning_uri: String,
}

/// Error types shared by the two-factor management use cases
#[derive(Debug, thiserror::Error)]
pub enum TwoFactorError {
    #[error("Invalid one-time code")]
    InvalidOtp,
    #[error("Two-factor enrollment has not started")]
    EnrollmentNotStarted,
    #[error("Two-factor engine error: {0}")]
    EngineError(#[from] TotpEngineError),
    #[error("Credential store error: {0}")]
    StoreError(#[from] CredentialStoreError),
}

/// Begin (or resume) two-factor enrollment.
///
/// The secret is created lazily, exactly once: a retried enrollment before
/// activation reuses the stored secret, so the QR code the user already
/// scanned stays valid.
pub struct BeginTwoFactorEnrollmentUseCase<'a, C, T>
where
    C: CredentialStore,
    T: TotpEngine,
{
    credential_store: &'a C,
    totp_engine: &'a T,
    issuer: &'a str,
}

impl<'a, C, T> BeginTwoFactorEnrollmentUseCase<'a, C, T>
where
    C: CredentialStore,
    T: TotpEngine,
{
    pub fn new(credential_store: &'a C, totp_engine: &'a T, issuer: &'a str) -> Self {
        Self {
            credential_store,
            totp_engine,
            issuer,
        }
    }

    #[tracing::instrument(name = "BeginTwoFactorEnrollmentUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<TwoFactorEnrollment, TwoFactorError> {
        let user = self.credential_store.find_user_by_id(user_id).await?;

        let secret = match user.two_factor_secret() {
            Some(secret) => secret.clone(),
            None => {
                let secret = self.totp_engine.generate_secret();
                self.credential_store
                    .set_two_factor_secret(user_id, secret.clone())
                    .await?;
                secret
            }
        };

        let provisioning_uri = self
            .totp_engine
            .key_uri(user.email(), self.issuer, &secret)?;

        Ok(TwoFactorEnrollment {
            secret,
            provisioning_uri,
        })
    }
}

/// Confirm enrollment by validating a first code against the not-yet-active
/// secret; only then is two-factor switched on for the account.
pub struct ConfirmTwoFactorEnrollmentUseCase<'a, C, T>
where
    C: CredentialStore,
    T: TotpEngine,
{
    credential_store: &'a C,
    totp_engine: &'a T,
}

impl<'a, C, T> ConfirmTwoFactorEnrollmentUseCase<'a, C, T>
where
    C: CredentialStore,
    T: TotpEngine,
{
    pub fn new(credential_store: &'a C, totp_engine: &'a T) -> Self {
        Self {
            credential_store,
            totp_engine,
        }
    }

    #[tracing::instrument(
        name = "ConfirmTwoFactorEnrollmentUseCase::execute",
        skip(self, code)
    )]
    pub async fn execute(&self, user_id: UserId, code: &str) -> Result<(), TwoFactorError> {
        let user = self.credential_store.find_user_by_id(user_id).await?;

        let secret = user
            .two_factor_secret()
            .ok_or(TwoFactorError::EnrollmentNotStarted)?;

        if !self.totp_engine.check(code, secret) {
            return Err(TwoFactorError::InvalidOtp);
        }

        self.credential_store
            .set_two_factor_activated(user_id, true)
            .await?;

        Ok(())
    }
}

/// Disable two-factor for an account.
///
/// The secret is intentionally retained: re-enrollment after a disable is
/// lenient and does not force a fresh QR scan unless the caller chooses to
/// regenerate.
pub struct DisableTwoFactorUseCase<'a, C>
where
    C: CredentialStore,
{
    credential_store: &'a C,
}

impl<'a, C> DisableTwoFactorUseCase<'a, C>
where
    C: CredentialStore,
{
    pub fn new(credential_store: &'a C) -> Self {
        Self { credential_store }
    }

    #[tracing::instrument(name = "DisableTwoFactorUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<(), TwoFactorError> {
        self.credential_store
            .set_two_factor_activated(user_id, false)
            .await?;

        Ok(())
    }
}
