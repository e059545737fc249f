use warden_core::{
    CredentialStore, CredentialStoreError, Password, PasswordHasher, PasswordHasherError,
};

/// Error types specific to the password update (reset consumption) use case
#[derive(Debug, thiserror::Error)]
pub enum UpdatePasswordError {
    #[error("Your token is invalid or has expired")]
    TokenInvalid,
    #[error("Failed to hash password: {0}")]
    HasherError(#[from] PasswordHasherError),
    #[error("Credential store error: {0}")]
    StoreError(CredentialStoreError),
}

/// Password update use case - consumes a reset token.
///
/// The new password is hashed first; the store then re-validates the token,
/// swaps in the digest and deletes the token row as one atomic unit, so a
/// token observed as valid moments ago can still lose the race and fail
/// here. `TokenInvalid` is reported distinctly from password validation
/// failures so the caller can force the link to be re-checked.
pub struct UpdatePasswordUseCase<'a, C, H>
where
    C: CredentialStore,
    H: PasswordHasher,
{
    credential_store: &'a C,
    password_hasher: &'a H,
}

impl<'a, C, H> UpdatePasswordUseCase<'a, C, H>
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

    #[tracing::instrument(name = "UpdatePasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: &str,
        new_password: Password,
    ) -> Result<(), UpdatePasswordError> {
        let digest = self.password_hasher.hash(&new_password).await?;

        match self
            .credential_store
            .consume_reset_token(token, digest)
            .await
        {
            Ok(_user_id) => Ok(()),
            Err(CredentialStoreError::TokenNotFound | CredentialStoreError::TokenExpired) => {
                Err(UpdatePasswordError::TokenInvalid)
            }
            Err(e) => Err(UpdatePasswordError::StoreError(e)),
        }
    }
}
