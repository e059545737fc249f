pub mod config;
pub mod email;
pub mod hashing;
pub mod persistence;
pub mod session;
pub mod totp;

pub use email::{MockEmailClient, PostmarkEmailClient, SentEmail};
pub use hashing::Argon2PasswordHasher;
pub use persistence::{InMemoryCredentialStore, PostgresCredentialStore};
pub use session::{JwtSessionConfig, JwtSessionIssuer};
pub use totp::TotpRsEngine;
