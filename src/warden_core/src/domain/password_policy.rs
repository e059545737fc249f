use serde::Deserialize;

/// Externally configured password rules.
///
/// The core enforces but does not define the ruleset; one policy value is
/// injected and reused across registration, change-password and reset flows
/// so there is a single source of truth.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_digit: bool,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_symbol: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 5,
            require_digit: false,
            require_uppercase: false,
            require_lowercase: false,
            require_symbol: false,
        }
    }
}
