use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// A syntactically valid email address.
///
/// Stored and compared verbatim. No case normalization is applied, so the
/// credential store's uniqueness constraint is case-sensitive.
#[derive(Clone)]
pub struct Email(Secret<String>);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Not a valid email address")]
    Invalid,
}

impl Email {
    pub fn parse(raw: Secret<String>) -> Result<Self, EmailError> {
        if EMAIL_PATTERN.is_match(raw.expose_secret()) {
            Ok(Self(raw))
        } else {
            Err(EmailError::Invalid)
        }
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl fmt::Debug for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Email([REDACTED])")
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
