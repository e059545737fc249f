use std::fmt;

use secrecy::Secret;

use crate::domain::{email::Email, user::UserId};

/// Opaque session handle minted by the session issuer once every required
/// factor has verified. Transport (cookies, headers) is the caller's concern.
#[derive(Clone)]
pub struct SessionToken(Secret<String>);

impl SessionToken {
    pub fn new(token: Secret<String>) -> Self {
        Self(token)
    }
}

impl From<Secret<String>> for SessionToken {
    fn from(token: Secret<String>) -> Self {
        Self(token)
    }
}

impl AsRef<Secret<String>> for SessionToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

/// The identity carried by an established session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub user_id: UserId,
    pub email: Email,
}
