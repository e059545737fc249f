use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use uuid::Uuid;

use crate::domain::user::UserId;

/// Reset links stay valid for one hour from issuance.
pub const RESET_TOKEN_TTL_SECONDS: i64 = 3600;

// 32 random bytes, hex-encoded: 256 bits of entropy per token.
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResetTokenId(Uuid);

impl ResetTokenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ResetTokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ResetTokenId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// A single-use, time-limited credential proving control of an email address.
///
/// At most one live token exists per user: issuing a new one replaces any
/// outstanding token via the store's upsert. Consumed tokens are deleted;
/// unconsumed ones silently expire by wall-clock comparison.
#[derive(Clone)]
pub struct PasswordResetToken {
    id: ResetTokenId,
    user_id: UserId,
    token: String,
    expires_at: DateTime<Utc>,
}

impl PasswordResetToken {
    /// Issues a fresh unguessable token expiring one hour from now.
    pub fn issue(user_id: UserId) -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self {
            id: ResetTokenId::new(),
            user_id,
            token: hex::encode(bytes),
            expires_at: Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECONDS),
        }
    }

    pub fn from_parts(
        id: ResetTokenId,
        user_id: UserId,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            token,
            expires_at,
        }
    }

    pub fn id(&self) -> ResetTokenId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// A token is valid iff the current time is strictly before its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Debug for PasswordResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordResetToken")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
