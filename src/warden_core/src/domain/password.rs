use std::fmt;

use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use crate::domain::password_policy::PasswordPolicy;

/// A new password that has passed policy validation.
///
/// Login candidates are deliberately NOT represented by this type: a stored
/// password may predate the current policy, so candidates travel as plain
/// `Secret<String>` and are judged only against the stored digest.
#[derive(Clone)]
pub struct Password(Secret<String>);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must be at least {0} characters long")]
    TooShort(usize),
    #[error("Password must contain at least one digit")]
    MissingDigit,
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,
    #[error("Password must contain at least one symbol")]
    MissingSymbol,
    #[error("Passwords do not match")]
    ConfirmMismatch,
}

impl Password {
    pub fn parse(raw: Secret<String>, policy: &PasswordPolicy) -> Result<Self, PasswordError> {
        {
            let value = raw.expose_secret();
            if value.chars().count() < policy.min_length {
                return Err(PasswordError::TooShort(policy.min_length));
            }
            if policy.require_digit && !value.chars().any(|c| c.is_ascii_digit()) {
                return Err(PasswordError::MissingDigit);
            }
            if policy.require_uppercase && !value.chars().any(char::is_uppercase) {
                return Err(PasswordError::MissingUppercase);
            }
            if policy.require_lowercase && !value.chars().any(char::is_lowercase) {
                return Err(PasswordError::MissingLowercase);
            }
            if policy.require_symbol && !value.chars().any(|c| !c.is_alphanumeric()) {
                return Err(PasswordError::MissingSymbol);
            }
        }
        Ok(Self(raw))
    }

    /// Policy validation plus the confirm-match rule used by registration,
    /// change-password and reset forms.
    pub fn parse_with_confirm(
        raw: Secret<String>,
        confirm: &Secret<String>,
        policy: &PasswordPolicy,
    ) -> Result<Self, PasswordError> {
        if raw.expose_secret() != confirm.expose_secret() {
            return Err(PasswordError::ConfirmMismatch);
        }
        Self::parse(raw, policy)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Password {}

/// An opaque, salted one-way digest of a password as produced by the hasher
/// port. Never absent on a registered user.
#[derive(Clone)]
pub struct PasswordDigest(Secret<String>);

impl PasswordDigest {
    pub fn new(digest: Secret<String>) -> Self {
        Self(digest)
    }
}

impl From<Secret<String>> for PasswordDigest {
    fn from(digest: Secret<String>) -> Self {
        Self(digest)
    }
}

impl AsRef<Secret<String>> for PasswordDigest {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest([REDACTED])")
    }
}
