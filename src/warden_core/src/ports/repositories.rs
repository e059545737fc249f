use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::PasswordDigest,
    reset_token::{PasswordResetToken, ResetTokenId},
    totp_secret::TotpSecret,
    user::{User, UserId},
};

// CredentialStore port trait and errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("An account with that email already exists")]
    DuplicateEmail,
    #[error("User not found")]
    UserNotFound,
    #[error("Reset token not found")]
    TokenNotFound,
    #[error("Reset token has expired")]
    TokenExpired,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for CredentialStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DuplicateEmail, Self::DuplicateEmail) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::TokenNotFound, Self::TokenNotFound) => true,
            (Self::TokenExpired, Self::TokenExpired) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Persistence for user records and password-reset tokens.
///
/// The store is the only component that persists; the use cases issue
/// commands through it and never touch storage directly.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn insert_user(&self, user: User) -> Result<(), CredentialStoreError>;

    async fn find_user_by_email(&self, email: &Email) -> Result<User, CredentialStoreError>;

    async fn find_user_by_id(&self, id: UserId) -> Result<User, CredentialStoreError>;

    async fn update_password_digest(
        &self,
        id: UserId,
        digest: PasswordDigest,
    ) -> Result<(), CredentialStoreError>;

    async fn set_two_factor_secret(
        &self,
        id: UserId,
        secret: TotpSecret,
    ) -> Result<(), CredentialStoreError>;

    async fn set_two_factor_activated(
        &self,
        id: UserId,
        activated: bool,
    ) -> Result<(), CredentialStoreError>;

    async fn find_reset_token(
        &self,
        token: &str,
    ) -> Result<PasswordResetToken, CredentialStoreError>;

    /// Keyed by user id: replaces any outstanding token for the same user,
    /// so at most one live reset token per user exists at any time.
    async fn upsert_reset_token(
        &self,
        token: PasswordResetToken,
    ) -> Result<(), CredentialStoreError>;

    async fn delete_reset_token(&self, id: ResetTokenId) -> Result<(), CredentialStoreError>;

    /// Re-validates the token, updates the owner's password digest and
    /// deletes the token row as one atomic unit. A token can therefore not
    /// be consumed twice even under concurrent requests.
    async fn consume_reset_token(
        &self,
        token: &str,
        new_digest: PasswordDigest,
    ) -> Result<UserId, CredentialStoreError>;
}
