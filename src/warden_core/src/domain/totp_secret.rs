use std::fmt;

use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

// 16 base32 characters encode 80 bits, the floor for a TOTP shared secret.
const MIN_BASE32_CHARS: usize = 16;

/// A base32-encoded shared secret for time-based one-time codes.
///
/// Created once per user when 2FA enrollment begins and reused on retried
/// enrollment; retained (inactive) after 2FA is disabled.
#[derive(Clone)]
pub struct TotpSecret(Secret<String>);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotpSecretError {
    #[error("Two-factor secret must be unpadded base32 with at least 80 bits of entropy")]
    Invalid,
}

impl TotpSecret {
    pub fn parse(raw: Secret<String>) -> Result<Self, TotpSecretError> {
        let well_formed = {
            let value = raw.expose_secret();
            value.len() >= MIN_BASE32_CHARS
                && value.chars().all(|c| matches!(c, 'A'..='Z' | '2'..='7'))
        };
        if well_formed {
            Ok(Self(raw))
        } else {
            Err(TotpSecretError::Invalid)
        }
    }
}

impl TryFrom<Secret<String>> for TotpSecret {
    type Error = TotpSecretError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl AsRef<Secret<String>> for TotpSecret {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl fmt::Debug for TotpSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TotpSecret([REDACTED])")
    }
}

impl PartialEq for TotpSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for TotpSecret {}
