use secrecy::Secret;
use warden_core::{
    CredentialStore, CredentialStoreError, Password, PasswordHasher, PasswordHasherError, UserId,
};

/// Error types specific to the change password use case
#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Current password is incorrect")]
    InvalidCurrentPassword,
    #[error("Failed to hash password: {0}")]
    HasherError(#[from] PasswordHasherError),
    #[error("Credential store error: {0}")]
    StoreError(#[from] CredentialStoreError),
}

/// Change password use case for an already-authenticated identity.
///
/// The current password is re-verified against the stored digest before the
/// new one is accepted: a stolen session alone is not enough to silently
/// rotate credentials.
pub struct ChangePasswordUseCase<'a, C, H>
where
    C: CredentialStore,
    H: PasswordHasher,
{
    credential_store: &'a C,
    password_hasher: &'a H,
}

impl<'a, C, H> ChangePasswordUseCase<'a, C, H>
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

    #[tracing::instrument(
        name = "ChangePasswordUseCase::execute",
        skip(self, current_password, new_password)
    )]
    pub async fn execute(
        &self,
        user_id: UserId,
        current_password: Secret<String>,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        let user = self.credential_store.find_user_by_id(user_id).await?;

        if !self
            .password_hasher
            .verify(&current_password, user.password_digest())
            .await
        {
            return Err(ChangePasswordError::InvalidCurrentPassword);
        }

        let digest = self.password_hasher.hash(&new_password).await?;
        self.credential_store
            .update_password_digest(user_id, digest)
            .await?;

        Ok(())
    }
}
