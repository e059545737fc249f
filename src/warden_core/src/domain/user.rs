use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{email::Email, password::PasswordDigest, totp_secret::TotpSecret};

/// Stable, unique identity of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Two-factor is activated but no secret is enrolled")]
    ActivatedWithoutSecret,
}

/// A user record as owned by the credential store.
///
/// Invariant: `two_factor_activated` implies a two-factor secret is present.
/// `new` starts with 2FA off; `from_parts` rehydrates stored rows and is the
/// only constructor that can observe a violated invariant.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Email,
    password_digest: PasswordDigest,
    two_factor_secret: Option<TotpSecret>,
    two_factor_activated: bool,
}

impl User {
    /// A freshly registered user: random id, no 2FA enrollment.
    pub fn new(email: Email, password_digest: PasswordDigest) -> Self {
        Self {
            id: UserId::new(),
            email,
            password_digest,
            two_factor_secret: None,
            two_factor_activated: false,
        }
    }

    pub fn from_parts(
        id: UserId,
        email: Email,
        password_digest: PasswordDigest,
        two_factor_secret: Option<TotpSecret>,
        two_factor_activated: bool,
    ) -> Result<Self, UserError> {
        if two_factor_activated && two_factor_secret.is_none() {
            return Err(UserError::ActivatedWithoutSecret);
        }
        Ok(Self {
            id,
            email,
            password_digest,
            two_factor_secret,
            two_factor_activated,
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    pub fn two_factor_secret(&self) -> Option<&TotpSecret> {
        self.two_factor_secret.as_ref()
    }

    pub fn two_factor_activated(&self) -> bool {
        self.two_factor_activated
    }

    pub fn set_password_digest(&mut self, digest: PasswordDigest) {
        self.password_digest = digest;
    }

    /// Overwrites the enrolled secret. Callers wanting idempotent enrollment
    /// check `two_factor_secret()` first and reuse what is already there.
    pub fn set_two_factor_secret(&mut self, secret: TotpSecret) {
        self.two_factor_secret = Some(secret);
    }

    pub fn set_two_factor_activated(&mut self, activated: bool) -> Result<(), UserError> {
        if activated && self.two_factor_secret.is_none() {
            return Err(UserError::ActivatedWithoutSecret);
        }
        self.two_factor_activated = activated;
        Ok(())
    }
}
