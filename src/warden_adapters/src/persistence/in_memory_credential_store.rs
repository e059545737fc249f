use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use warden_core::{
    CredentialStore, CredentialStoreError, Email, PasswordDigest, PasswordResetToken,
    ResetTokenId, TotpSecret, User, UserId,
};

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, User>,
    email_index: HashMap<Email, UserId>,
    // Keyed by user id: the upsert semantics fall out of the map itself.
    reset_tokens: HashMap<UserId, PasswordResetToken>,
}

impl Inner {
    fn user_mut(&mut self, id: UserId) -> Result<&mut User, CredentialStoreError> {
        self.users
            .get_mut(&id)
            .ok_or(CredentialStoreError::UserNotFound)
    }
}

/// In-memory credential store backed by `Arc<RwLock<..>>` maps.
///
/// Used by the test suites and as a reference implementation of the port's
/// atomicity contract: `consume_reset_token` runs inside one write-lock
/// critical section, mirroring the transaction the Postgres store uses.
#[derive(Default, Clone)]
pub struct InMemoryCredentialStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn insert_user(&self, user: User) -> Result<(), CredentialStoreError> {
        let mut inner = self.inner.write().await;
        if inner.email_index.contains_key(user.email()) {
            return Err(CredentialStoreError::DuplicateEmail);
        }
        inner.email_index.insert(user.email().clone(), user.id());
        inner.users.insert(user.id(), user);
        Ok(())
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<User, CredentialStoreError> {
        let inner = self.inner.read().await;
        let id = inner
            .email_index
            .get(email)
            .ok_or(CredentialStoreError::UserNotFound)?;
        inner
            .users
            .get(id)
            .cloned()
            .ok_or(CredentialStoreError::UserNotFound)
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<User, CredentialStoreError> {
        let inner = self.inner.read().await;
        inner
            .users
            .get(&id)
            .cloned()
            .ok_or(CredentialStoreError::UserNotFound)
    }

    async fn update_password_digest(
        &self,
        id: UserId,
        digest: PasswordDigest,
    ) -> Result<(), CredentialStoreError> {
        let mut inner = self.inner.write().await;
        inner.user_mut(id)?.set_password_digest(digest);
        Ok(())
    }

    async fn set_two_factor_secret(
        &self,
        id: UserId,
        secret: TotpSecret,
    ) -> Result<(), CredentialStoreError> {
        let mut inner = self.inner.write().await;
        inner.user_mut(id)?.set_two_factor_secret(secret);
        Ok(())
    }

    async fn set_two_factor_activated(
        &self,
        id: UserId,
        activated: bool,
    ) -> Result<(), CredentialStoreError> {
        let mut inner = self.inner.write().await;
        inner
            .user_mut(id)?
            .set_two_factor_activated(activated)
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))
    }

    async fn find_reset_token(
        &self,
        token: &str,
    ) -> Result<PasswordResetToken, CredentialStoreError> {
        let inner = self.inner.read().await;
        inner
            .reset_tokens
            .values()
            .find(|t| t.token() == token)
            .cloned()
            .ok_or(CredentialStoreError::TokenNotFound)
    }

    async fn upsert_reset_token(
        &self,
        token: PasswordResetToken,
    ) -> Result<(), CredentialStoreError> {
        let mut inner = self.inner.write().await;
        inner.reset_tokens.insert(token.user_id(), token);
        Ok(())
    }

    async fn delete_reset_token(&self, id: ResetTokenId) -> Result<(), CredentialStoreError> {
        let mut inner = self.inner.write().await;
        let user_id = inner
            .reset_tokens
            .iter()
            .find(|(_, t)| t.id() == id)
            .map(|(user_id, _)| *user_id)
            .ok_or(CredentialStoreError::TokenNotFound)?;
        inner.reset_tokens.remove(&user_id);
        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token: &str,
        new_digest: PasswordDigest,
    ) -> Result<UserId, CredentialStoreError> {
        let mut inner = self.inner.write().await;

        let user_id = inner
            .reset_tokens
            .values()
            .find(|t| t.token() == token)
            .map(PasswordResetToken::user_id)
            .ok_or(CredentialStoreError::TokenNotFound)?;

        let reset_token = &inner.reset_tokens[&user_id];
        if reset_token.is_expired(Utc::now()) {
            return Err(CredentialStoreError::TokenExpired);
        }

        inner.user_mut(user_id)?.set_password_digest(new_digest);
        inner.reset_tokens.remove(&user_id);
        Ok(user_id)
    }
}
