use base32::Alphabet;
use rand::RngCore;
use secrecy::{ExposeSecret, Secret};
use totp_rs::{Algorithm, Secret as TotpRsSecret, TOTP};

use warden_core::{Email, TotpEngine, TotpEngineError, TotpSecret};

// RFC 6238 defaults as expected by authenticator apps.
const DIGITS: usize = 6;
const SKEW: u8 = 1;
const STEP_SECONDS: u64 = 30;
// 20 random bytes -> 32 base32 characters, 160 bits of entropy.
const SECRET_BYTES: usize = 20;

/// TOTP engine backed by `totp-rs`: SHA-1, 6 digits, 30-second steps and a
/// one-step skew window either side.
#[derive(Debug, Clone, Default)]
pub struct TotpRsEngine;

impl TotpRsEngine {
    pub fn new() -> Self {
        Self
    }

    fn totp(
        account: String,
        issuer: Option<String>,
        secret: &TotpSecret,
    ) -> Result<TOTP, TotpEngineError> {
        let bytes = TotpRsSecret::Encoded(secret.as_ref().expose_secret().clone())
            .to_bytes()
            .map_err(|e| TotpEngineError::InvalidSecret(format!("{e:?}")))?;

        TOTP::new(
            Algorithm::SHA1,
            DIGITS,
            SKEW,
            STEP_SECONDS,
            bytes,
            issuer,
            account,
        )
        .map_err(|e| TotpEngineError::InvalidSecret(e.to_string()))
    }
}

impl TotpEngine for TotpRsEngine {
    fn generate_secret(&self) -> TotpSecret {
        let mut bytes = [0u8; SECRET_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        let encoded = base32::encode(Alphabet::RFC4648 { padding: false }, &bytes);
        TotpSecret::parse(Secret::from(encoded)).expect("generated secret is valid base32")
    }

    fn key_uri(
        &self,
        account: &Email,
        issuer: &str,
        secret: &TotpSecret,
    ) -> Result<String, TotpEngineError> {
        let totp = Self::totp(
            account.as_ref().expose_secret().clone(),
            Some(issuer.to_string()),
            secret,
        )?;
        Ok(totp.get_url())
    }

    fn check(&self, code: &str, secret: &TotpSecret) -> bool {
        if code.len() != DIGITS || !code.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        // The account label plays no part in code validation.
        let Ok(totp) = Self::totp("account".to_string(), None, secret) else {
            return false;
        };
        totp.check_current(code).unwrap_or(false)
    }
}
