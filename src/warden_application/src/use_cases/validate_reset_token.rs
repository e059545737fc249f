use chrono::Utc;
use warden_core::{CredentialStore, CredentialStoreError, UserId};

/// Error types specific to reset token validation
#[derive(Debug, thiserror::Error)]
pub enum ValidateResetTokenError {
    #[error("Your token is invalid or has expired")]
    TokenInvalid,
    #[error("Credential store error: {0}")]
    StoreError(CredentialStoreError),
}

/// Read-only reset token check.
///
/// Used twice per reset: once to gate the update-password form, and again -
/// atomically, inside the store - when the token is consumed. A token is
/// valid iff it exists and the current time is strictly before its expiry;
/// missing, replaced and expired tokens are indistinguishable to the caller.
pub struct ValidateResetTokenUseCase<'a, C>
where
    C: CredentialStore,
{
    credential_store: &'a C,
}

impl<'a, C> ValidateResetTokenUseCase<'a, C>
where
    C: CredentialStore,
{
    pub fn new(credential_store: &'a C) -> Self {
        Self { credential_store }
    }

    #[tracing::instrument(name = "ValidateResetTokenUseCase::execute", skip(self, token))]
    pub async fn execute(&self, token: &str) -> Result<UserId, ValidateResetTokenError> {
        let reset_token = match self.credential_store.find_reset_token(token).await {
            Ok(reset_token) => reset_token,
            Err(CredentialStoreError::TokenNotFound) => {
                return Err(ValidateResetTokenError::TokenInvalid);
            }
            Err(e) => return Err(ValidateResetTokenError::StoreError(e)),
        };

        if reset_token.is_expired(Utc::now()) {
            return Err(ValidateResetTokenError::TokenInvalid);
        }

        Ok(reset_token.user_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use warden_core::{Email, PasswordDigest, PasswordResetToken, ResetTokenId, User};

    struct MockCredentialStore {
        token: PasswordResetToken,
    }

    #[async_trait::async_trait]
    impl CredentialStore for MockCredentialStore {
        async fn insert_user(&self, _user: User) -> Result<(), CredentialStoreError> {
            unimplemented!()
        }

        async fn find_user_by_email(&self, _email: &Email) -> Result<User, CredentialStoreError> {
            unimplemented!()
        }

        async fn find_user_by_id(&self, _id: UserId) -> Result<User, CredentialStoreError> {
            unimplemented!()
        }

        async fn update_password_digest(
            &self,
            _id: UserId,
            _digest: PasswordDigest,
        ) -> Result<(), CredentialStoreError> {
            unimplemented!()
        }

        async fn set_two_factor_secret(
            &self,
            _id: UserId,
            _secret: warden_core::TotpSecret,
        ) -> Result<(), CredentialStoreError> {
            unimplemented!()
        }

        async fn set_two_factor_activated(
            &self,
            _id: UserId,
            _activated: bool,
        ) -> Result<(), CredentialStoreError> {
            unimplemented!()
        }

        async fn find_reset_token(
            &self,
            token: &str,
        ) -> Result<PasswordResetToken, CredentialStoreError> {
            if token == self.token.token() {
                Ok(self.token.clone())
            } else {
                Err(CredentialStoreError::TokenNotFound)
            }
        }

        async fn upsert_reset_token(
            &self,
            _token: PasswordResetToken,
        ) -> Result<(), CredentialStoreError> {
            unimplemented!()
        }

        async fn delete_reset_token(&self, _id: ResetTokenId) -> Result<(), CredentialStoreError> {
            unimplemented!()
        }

        async fn consume_reset_token(
            &self,
            _token: &str,
            _new_digest: PasswordDigest,
        ) -> Result<UserId, CredentialStoreError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn live_token_resolves_to_its_user() {
        let user_id = UserId::new();
        let token = PasswordResetToken::issue(user_id);
        let token_string = token.token().to_string();
        let store = MockCredentialStore { token };
        let use_case = ValidateResetTokenUseCase::new(&store);

        assert_eq!(use_case.execute(&token_string).await.unwrap(), user_id);
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let store = MockCredentialStore {
            token: PasswordResetToken::issue(UserId::new()),
        };
        let use_case = ValidateResetTokenUseCase::new(&store);

        let result = use_case.execute("deadbeef").await;
        assert!(matches!(result, Err(ValidateResetTokenError::TokenInvalid)));
    }

    #[tokio::test]
    async fn expired_token_is_invalid_even_when_the_string_matches() {
        let token = PasswordResetToken::from_parts(
            ResetTokenId::new(),
            UserId::new(),
            "cafebabe".to_string(),
            Utc::now() - Duration::seconds(1),
        );
        let store = MockCredentialStore { token };
        let use_case = ValidateResetTokenUseCase::new(&store);

        let result = use_case.execute("cafebabe").await;
        assert!(matches!(result, Err(ValidateResetTokenError::TokenInvalid)));
    }
}
