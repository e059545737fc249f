use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};

use warden_core::{Password, PasswordDigest, PasswordHasher, PasswordHasherError};

/// Argon2id hasher with fixed parameters.
///
/// The cost is pinned so verification latency stays bounded; digests embed
/// their own salt and parameters, so tuning the constants only affects
/// newly created digests. Hashing runs on a blocking thread to keep the
/// async executor responsive.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

const M_COST_KIB: u32 = 15000;
const T_COST: u32 = 2;
const P_COST: u32 = 1;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHasherError> {
        let password = password.clone();
        let current_span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                let hasher = Argon2::new(
                    Algorithm::Argon2id,
                    Version::V0x13,
                    Params::new(M_COST_KIB, T_COST, P_COST, None).map_err(|e| e.to_string())?,
                );
                hasher
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| PasswordDigest::from(Secret::from(h.to_string())))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))?;

        result.map_err(PasswordHasherError::HashingFailed)
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(&self, candidate: &Secret<String>, digest: &PasswordDigest) -> bool {
        let candidate = candidate.clone();
        let digest = digest.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let Ok(expected) = PasswordHash::new(digest.as_ref().expose_secret()) else {
                    // Malformed digest verifies as false, never errors.
                    return false;
                };
                let Ok(params) = Params::new(M_COST_KIB, T_COST, P_COST, None) else {
                    return false;
                };
                Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                    .verify_password(candidate.expose_secret().as_bytes(), &expected)
                    .is_ok()
            })
        })
        .await
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::PasswordPolicy;

    fn password(raw: &str) -> Password {
        Password::parse(Secret::from(raw.to_string()), &PasswordPolicy::default()).unwrap()
    }

    #[tokio::test]
    async fn digest_verifies_against_its_own_password() {
        let hasher = Argon2PasswordHasher::new();
        let digest = hasher.hash(&password("Secret123!")).await.unwrap();

        assert!(
            hasher
                .verify(&Secret::from("Secret123!".to_string()), &digest)
                .await
        );
    }

    #[tokio::test]
    async fn wrong_candidate_fails_verification() {
        let hasher = Argon2PasswordHasher::new();
        let digest = hasher.hash(&password("Secret123!")).await.unwrap();

        assert!(
            !hasher
                .verify(&Secret::from("Secret123?".to_string()), &digest)
                .await
        );
    }

    #[tokio::test]
    async fn hashing_salts_each_digest() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash(&password("Secret123!")).await.unwrap();
        let second = hasher.hash(&password("Secret123!")).await.unwrap();

        assert_ne!(
            first.as_ref().expose_secret(),
            second.as_ref().expose_secret()
        );
    }

    #[tokio::test]
    async fn malformed_digest_verifies_as_false() {
        let hasher = Argon2PasswordHasher::new();
        let digest = PasswordDigest::from(Secret::from("not-a-phc-string".to_string()));

        assert!(
            !hasher
                .verify(&Secret::from("Secret123!".to_string()), &digest)
                .await
        );
    }
}
