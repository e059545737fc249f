use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warden_core::{
    AuthenticatedSession, Email, SessionIssuer, SessionIssuerError, SessionToken, UserId,
};

#[derive(Clone)]
pub struct JwtSessionConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

/// Session issuer minting HS256 JWTs.
///
/// The token itself is the opaque handle; how it travels (cookie, header)
/// is the embedding application's concern. An undecodable or expired token
/// simply means "no authenticated session".
#[derive(Clone)]
pub struct JwtSessionIssuer {
    config: JwtSessionConfig,
}

impl JwtSessionIssuer {
    pub fn new(config: JwtSessionConfig) -> Self {
        Self { config }
    }

    fn secret_bytes(&self) -> &[u8] {
        self.config.jwt_secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: Uuid,
    email: String,
    exp: usize,
}

#[async_trait::async_trait]
impl SessionIssuer for JwtSessionIssuer {
    async fn establish(
        &self,
        user_id: UserId,
        email: &Email,
    ) -> Result<SessionToken, SessionIssuerError> {
        let delta = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds).ok_or(
            SessionIssuerError::UnexpectedError("failed to create session duration".to_string()),
        )?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or(SessionIssuerError::UnexpectedError(
                "session duration out of range".to_string(),
            ))?
            .timestamp();

        let exp: usize = exp.try_into().map_err(|_| {
            SessionIssuerError::UnexpectedError("failed to cast i64 to usize".to_string())
        })?;

        let claims = SessionClaims {
            sub: user_id.as_uuid(),
            email: email.as_ref().expose_secret().clone(),
            exp,
        };

        let token = encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret_bytes()),
        )
        .map_err(|e| SessionIssuerError::UnexpectedError(e.to_string()))?;

        Ok(SessionToken::from(Secret::from(token)))
    }

    async fn current(
        &self,
        token: &SessionToken,
    ) -> Result<AuthenticatedSession, SessionIssuerError> {
        let claims = decode::<SessionClaims>(
            token.as_ref().expose_secret(),
            &DecodingKey::from_secret(self.secret_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| SessionIssuerError::NotAuthenticated)?;

        let email = Email::parse(Secret::from(claims.email))
            .map_err(|e| SessionIssuerError::UnexpectedError(e.to_string()))?;

        Ok(AuthenticatedSession {
            user_id: UserId::from(claims.sub),
            email,
        })
    }
}
