pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    password::{Password, PasswordDigest, PasswordError},
    password_policy::PasswordPolicy,
    reset_token::{PasswordResetToken, RESET_TOKEN_TTL_SECONDS, ResetTokenId},
    session::{AuthenticatedSession, SessionToken},
    totp_secret::{TotpSecret, TotpSecretError},
    user::{User, UserError, UserId},
};

pub use ports::{
    repositories::{CredentialStore, CredentialStoreError},
    services::{
        EmailClient, PasswordHasher, PasswordHasherError, SessionIssuer, SessionIssuerError,
        TotpEngine, TotpEngineError,
    },
};
