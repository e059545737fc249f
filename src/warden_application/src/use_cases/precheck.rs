use secrecy::Secret;
use warden_core::{CredentialStore, CredentialStoreError, Email, PasswordHasher};

/// Response from the pre-login check
#[derive(Debug, PartialEq, Eq)]
pub struct PrecheckResponse {
    pub two_factor_activated: bool,
}

/// Error types specific to the pre-login check
#[derive(Debug, thiserror::Error)]
pub enum PrecheckError {
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Credential store error: {0}")]
    StoreError(CredentialStoreError),
}

/// Pre-login check - an optimistic hint telling the UI whether to ask for a
/// one-time code before submitting the full login.
///
/// Unknown email and wrong password collapse into the same generic failure
/// so responses cannot be used to enumerate accounts. The final
/// authentication never trusts this result; it re-verifies everything.
pub struct PrecheckUseCase<'a, C, H>
where
    C: CredentialStore,
    H: PasswordHasher,
{
    credential_store: &'a C,
    password_hasher: &'a H,
}

impl<'a, C, H> PrecheckUseCase<'a, C, H>
where
    C: CredentialStore,
    H: PasswordHasher,
{
    pub fn new(credential_store: &'a C, password_hasher: &'a H) -> Self {
        Self {
            credential_store,
            password_hasher,
        }
    }

    #[tracing::instrument(name = "PrecheckUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Secret<String>,
    ) -> Result<PrecheckResponse, PrecheckError> {
        let user = match self.credential_store.find_user_by_email(&email).await {
            Ok(user) => user,
            Err(CredentialStoreError::UserNotFound) => return Err(PrecheckError::InvalidCredentials),
            Err(e) => return Err(PrecheckError::StoreError(e)),
        };

        if !self
            .password_hasher
            .verify(&password, user.password_digest())
            .await
        {
            return Err(PrecheckError::InvalidCredentials);
        }

        Ok(PrecheckResponse {
            two_factor_activated: user.two_factor_activated(),
        })
    }
}
