//! # Warden - Credential-Lifecycle Authentication Library
//!
//! This is a facade crate that re-exports the public APIs of the warden
//! workspace members. Use this crate to get access to the whole
//! authentication core in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! warden = { path = "../warden" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `PasswordResetToken`, etc.
//! - **Port traits**: `CredentialStore`, `PasswordHasher`, `TotpEngine`,
//!   `EmailClient`, `SessionIssuer`
//! - **Use cases**: `LoginUseCase`, `RegisterUseCase`, etc.
//! - **Adapters**: `PostgresCredentialStore`, `InMemoryCredentialStore`,
//!   `Argon2PasswordHasher`, `TotpRsEngine`, `PostmarkEmailClient`,
//!   `JwtSessionIssuer`
//! - **Service**: `AuthService` - the main entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use warden_core::*;
}

// Re-export most commonly used core types at the root level
pub use warden_core::{
    AuthenticatedSession, Email, EmailError, Password, PasswordDigest, PasswordError,
    PasswordPolicy, PasswordResetToken, SessionToken, TotpSecret, User, UserError, UserId,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use warden_core::{
        CredentialStore, CredentialStoreError, EmailClient, PasswordHasher, PasswordHasherError,
        SessionIssuer, SessionIssuerError, TotpEngine, TotpEngineError,
    };
}

// Re-export port traits at root level
pub use warden_core::{
    CredentialStore, CredentialStoreError, EmailClient, PasswordHasher, SessionIssuer,
    TotpEngine,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use warden_application::*;
}

// Re-export use cases at root level
pub use warden_application::{
    BeginTwoFactorEnrollmentUseCase, ChangePasswordUseCase, ConfirmTwoFactorEnrollmentUseCase,
    DisableTwoFactorUseCase, LoginUseCase, PrecheckUseCase, RegisterUseCase,
    RequestPasswordResetUseCase, UpdatePasswordUseCase, ValidateResetTokenUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use warden_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use warden_adapters::email::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use warden_adapters::hashing::*;
    }

    /// TOTP engine
    pub mod totp {
        pub use warden_adapters::totp::*;
    }

    /// Session issuance
    pub mod session {
        pub use warden_adapters::session::*;
    }

    /// Configuration
    pub mod config {
        pub use warden_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use warden_adapters::{
    Argon2PasswordHasher, InMemoryCredentialStore, JwtSessionConfig, JwtSessionIssuer,
    MockEmailClient, PostgresCredentialStore, PostmarkEmailClient, TotpRsEngine,
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use warden_auth_service::{
    AuthConfig, AuthService, AuthServiceError, configure_postgresql, init_tracing,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

/// Re-export the async runtime the port traits are written against
pub use tokio;
