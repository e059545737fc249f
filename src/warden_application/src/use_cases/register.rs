use warden_core::{
    CredentialStore, CredentialStoreError, Email, Password, PasswordHasher, PasswordHasherError,
    User, UserId,
};

/// Error types specific to the registration use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("An account is already registered with that email address")]
    DuplicateEmail,
    #[error("Failed to hash password: {0}")]
    HasherError(#[from] PasswordHasherError),
    #[error("Credential store error: {0}")]
    StoreError(CredentialStoreError),
}

/// Registration use case - creates a new user with a hashed password.
///
/// Email syntax, password policy and confirm-match are enforced by the
/// `Email`/`Password` parsers before this point. Concurrent registrations of
/// the same address are arbitrated by the store's unique-email constraint;
/// the loser surfaces as `DuplicateEmail`, never as a raw storage error.
pub struct RegisterUseCase<'a, C, H>
where
    C: CredentialStore,
    H: PasswordHasher,
{
    credential_store: &'a C,
    password_hasher: &'a H,
}

impl<'a, C, H> RegisterUseCase<'a, C, H>
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

    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<UserId, RegisterError> {
        let digest = self.password_hasher.hash(&password).await?;
        let user = User::new(email, digest);
        let user_id = user.id();

        match self.credential_store.insert_user(user).await {
            Ok(()) => Ok(user_id),
            Err(CredentialStoreError::DuplicateEmail) => Err(RegisterError::DuplicateEmail),
            Err(e) => Err(RegisterError::StoreError(e)),
        }
    }
}
