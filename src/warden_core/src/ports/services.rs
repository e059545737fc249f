use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::{Password, PasswordDigest},
    session::{AuthenticatedSession, SessionToken},
    totp_secret::TotpSecret,
    user::UserId,
};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

// PasswordHasher port trait and errors
#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),
}

/// One-way password hashing with a fixed cost, salted per digest.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHasherError>;

    /// True iff `candidate` hashes (with the digest's embedded salt and
    /// parameters) to `digest`. A malformed digest verifies as false rather
    /// than erroring.
    async fn verify(&self, candidate: &Secret<String>, digest: &PasswordDigest) -> bool;
}

// TotpEngine port trait and errors
#[derive(Debug, Error)]
pub enum TotpEngineError {
    #[error("Invalid two-factor secret: {0}")]
    InvalidSecret(String),
}

/// Time-based one-time codes over a per-user shared secret.
pub trait TotpEngine: Send + Sync {
    /// A fresh random secret, cryptographically unguessable. Callers create
    /// it once per user and reuse it until enrollment is confirmed.
    fn generate_secret(&self) -> TotpSecret;

    /// `otpauth://` provisioning URI for QR-code rendering. Pure formatting.
    fn key_uri(
        &self,
        account: &Email,
        issuer: &str,
        secret: &TotpSecret,
    ) -> Result<String, TotpEngineError>;

    /// Validates a submitted code for the current time step, allowing the
    /// standard one-step clock-skew window either side. Malformed codes
    /// return false without erroring.
    fn check(&self, code: &str, secret: &TotpSecret) -> bool;
}

// SessionIssuer port trait and errors
#[derive(Debug, Error)]
pub enum SessionIssuerError {
    #[error("No authenticated session")]
    NotAuthenticated,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for SessionIssuerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotAuthenticated, Self::NotAuthenticated) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Mints and reads the session of an authenticated identity. Sessions are
/// established only after every required factor has verified; the handle's
/// transport is outside this crate.
#[async_trait]
pub trait SessionIssuer: Send + Sync {
    async fn establish(
        &self,
        user_id: UserId,
        email: &Email,
    ) -> Result<SessionToken, SessionIssuerError>;

    async fn current(
        &self,
        token: &SessionToken,
    ) -> Result<AuthenticatedSession, SessionIssuerError>;
}
