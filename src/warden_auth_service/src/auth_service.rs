use secrecy::Secret;
use thiserror::Error;

use warden_application::{
    BeginTwoFactorEnrollmentUseCase, ChangePasswordError, ChangePasswordUseCase,
    ConfirmTwoFactorEnrollmentUseCase, DisableTwoFactorUseCase, LoginError, LoginUseCase,
    PrecheckError, PrecheckResponse, PrecheckUseCase, RegisterError, RegisterUseCase,
    RequestPasswordResetError, RequestPasswordResetUseCase, TwoFactorEnrollment, TwoFactorError,
    UpdatePasswordError, UpdatePasswordUseCase, ValidateResetTokenError,
    ValidateResetTokenUseCase,
};
use warden_core::{
    AuthenticatedSession, CredentialStore, Email, EmailClient, EmailError, Password,
    PasswordError, PasswordHasher, PasswordPolicy, SessionIssuer, SessionIssuerError,
    SessionToken, TotpEngine, UserId,
};

/// Static wiring for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL reset links are built from.
    pub site_base_url: String,
    /// Issuer label embedded in TOTP provisioning URIs.
    pub totp_issuer: String,
    /// The single password policy enforced across registration, change and
    /// reset flows.
    pub password_policy: PasswordPolicy,
}

/// The error taxonomy exposed at the service boundary.
///
/// Every operation returns one of these tagged variants; callers branch on
/// kind, never on message text. `Validation` messages are safe to show
/// verbatim. `InvalidCredentials` deliberately covers unknown email and
/// wrong password alike. `Unexpected` wraps infrastructure failures whose
/// details belong in logs, not responses.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Invalid one-time code")]
    InvalidOtp,
    #[error("An account is already registered with that email address")]
    DuplicateEmail,
    #[error("Your token is invalid or has expired")]
    TokenInvalid,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for AuthServiceError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::InvalidOtp, Self::InvalidOtp) => true,
            (Self::DuplicateEmail, Self::DuplicateEmail) => true,
            (Self::TokenInvalid, Self::TokenInvalid) => true,
            (Self::Unauthorized, Self::Unauthorized) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

impl From<EmailError> for AuthServiceError {
    fn from(e: EmailError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<PasswordError> for AuthServiceError {
    fn from(e: PasswordError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<PrecheckError> for AuthServiceError {
    fn from(e: PrecheckError) -> Self {
        match e {
            PrecheckError::InvalidCredentials => Self::InvalidCredentials,
            PrecheckError::StoreError(e) => Self::Unexpected(e.to_string()),
        }
    }
}

impl From<LoginError> for AuthServiceError {
    fn from(e: LoginError) -> Self {
        match e {
            LoginError::InvalidCredentials => Self::InvalidCredentials,
            LoginError::InvalidOtp => Self::InvalidOtp,
            LoginError::StoreError(e) => Self::Unexpected(e.to_string()),
            LoginError::SessionError(e) => Self::Unexpected(e.to_string()),
        }
    }
}

impl From<RegisterError> for AuthServiceError {
    fn from(e: RegisterError) -> Self {
        match e {
            RegisterError::DuplicateEmail => Self::DuplicateEmail,
            RegisterError::HasherError(e) => Self::Unexpected(e.to_string()),
            RegisterError::StoreError(e) => Self::Unexpected(e.to_string()),
        }
    }
}

impl From<ChangePasswordError> for AuthServiceError {
    fn from(e: ChangePasswordError) -> Self {
        match e {
            ChangePasswordError::InvalidCurrentPassword => Self::InvalidCredentials,
            ChangePasswordError::HasherError(e) => Self::Unexpected(e.to_string()),
            ChangePasswordError::StoreError(e) => Self::Unexpected(e.to_string()),
        }
    }
}

impl From<RequestPasswordResetError> for AuthServiceError {
    fn from(e: RequestPasswordResetError) -> Self {
        match e {
            RequestPasswordResetError::StoreError(e) => Self::Unexpected(e.to_string()),
            RequestPasswordResetError::EmailError(e) => Self::Unexpected(e),
        }
    }
}

impl From<ValidateResetTokenError> for AuthServiceError {
    fn from(e: ValidateResetTokenError) -> Self {
        match e {
            ValidateResetTokenError::TokenInvalid => Self::TokenInvalid,
            ValidateResetTokenError::StoreError(e) => Self::Unexpected(e.to_string()),
        }
    }
}

impl From<UpdatePasswordError> for AuthServiceError {
    fn from(e: UpdatePasswordError) -> Self {
        match e {
            UpdatePasswordError::TokenInvalid => Self::TokenInvalid,
            UpdatePasswordError::HasherError(e) => Self::Unexpected(e.to_string()),
            UpdatePasswordError::StoreError(e) => Self::Unexpected(e.to_string()),
        }
    }
}

impl From<TwoFactorError> for AuthServiceError {
    fn from(e: TwoFactorError) -> Self {
        let message = e.to_string();
        match e {
            TwoFactorError::InvalidOtp => Self::InvalidOtp,
            TwoFactorError::EnrollmentNotStarted => Self::Validation(message),
            TwoFactorError::EngineError(_) | TwoFactorError::StoreError(_) => {
                Self::Unexpected(message)
            }
        }
    }
}

/// The authentication state machine, wired from injected capabilities.
///
/// Login moves `AwaitingCredentials -> Authenticated` directly, or through
/// `AwaitingSecondFactor` when the account has two-factor active. No
/// pending-login state survives a failure: the client resubmits the full
/// credentials (plus code) and every submission is verified from scratch.
/// Operations on an existing account take the caller's session token and
/// fail `Unauthorized` without a valid one.
pub struct AuthService<C, H, T, E, S>
where
    C: CredentialStore,
    H: PasswordHasher,
    T: TotpEngine,
    E: EmailClient,
    S: SessionIssuer,
{
    credential_store: C,
    password_hasher: H,
    totp_engine: T,
    email_client: E,
    session_issuer: S,
    config: AuthConfig,
}

impl<C, H, T, E, S> AuthService<C, H, T, E, S>
where
    C: CredentialStore,
    H: PasswordHasher,
    T: TotpEngine,
    E: EmailClient,
    S: SessionIssuer,
{
    pub fn new(
        credential_store: C,
        password_hasher: H,
        totp_engine: T,
        email_client: E,
        session_issuer: S,
        config: AuthConfig,
    ) -> Self {
        Self {
            credential_store,
            password_hasher,
            totp_engine,
            email_client,
            session_issuer,
            config,
        }
    }

    /// Optimistic pre-login check: verifies the credentials and reveals only
    /// whether a one-time code will be required. Not an authority - `login`
    /// re-verifies everything.
    #[tracing::instrument(name = "Precheck", skip_all)]
    pub async fn precheck(
        &self,
        email: Secret<String>,
        password: Secret<String>,
    ) -> Result<PrecheckResponse, AuthServiceError> {
        // Syntactically invalid addresses cannot belong to an account; they
        // fail exactly like an unknown one.
        let email = Email::parse(email).map_err(|_| AuthServiceError::InvalidCredentials)?;

        let response = PrecheckUseCase::new(&self.credential_store, &self.password_hasher)
            .execute(email, password)
            .await?;

        Ok(response)
    }

    #[tracing::instrument(name = "Login", skip_all)]
    pub async fn login(
        &self,
        email: Secret<String>,
        password: Secret<String>,
        otp_code: Option<String>,
    ) -> Result<SessionToken, AuthServiceError> {
        let email = Email::parse(email).map_err(|_| AuthServiceError::InvalidCredentials)?;

        let session = LoginUseCase::new(
            &self.credential_store,
            &self.password_hasher,
            &self.totp_engine,
            &self.session_issuer,
        )
        .execute(email, password, otp_code)
        .await?;

        Ok(session)
    }

    #[tracing::instrument(name = "Register", skip_all)]
    pub async fn register(
        &self,
        email: Secret<String>,
        password: Secret<String>,
        password_confirm: Secret<String>,
    ) -> Result<UserId, AuthServiceError> {
        let email = Email::parse(email)?;
        let password = Password::parse_with_confirm(
            password,
            &password_confirm,
            &self.config.password_policy,
        )?;

        let user_id = RegisterUseCase::new(&self.credential_store, &self.password_hasher)
            .execute(email, password)
            .await?;

        Ok(user_id)
    }

    /// Resolves the identity behind a session token.
    pub async fn current_session(
        &self,
        session: &SessionToken,
    ) -> Result<AuthenticatedSession, AuthServiceError> {
        self.session_issuer.current(session).await.map_err(|e| match e {
            SessionIssuerError::NotAuthenticated => AuthServiceError::Unauthorized,
            e => AuthServiceError::Unexpected(e.to_string()),
        })
    }

    #[tracing::instrument(name = "Change password", skip_all)]
    pub async fn change_password(
        &self,
        session: &SessionToken,
        current_password: Secret<String>,
        new_password: Secret<String>,
        new_password_confirm: Secret<String>,
    ) -> Result<(), AuthServiceError> {
        let identity = self.current_session(session).await?;
        let new_password = Password::parse_with_confirm(
            new_password,
            &new_password_confirm,
            &self.config.password_policy,
        )?;

        ChangePasswordUseCase::new(&self.credential_store, &self.password_hasher)
            .execute(identity.user_id, current_password, new_password)
            .await?;

        Ok(())
    }

    /// Always answers uniformly for syntactically valid addresses, whether
    /// or not an account exists.
    #[tracing::instrument(name = "Request password reset", skip_all)]
    pub async fn request_password_reset(
        &self,
        email: Secret<String>,
    ) -> Result<(), AuthServiceError> {
        let email = Email::parse(email)?;

        RequestPasswordResetUseCase::new(
            &self.credential_store,
            &self.email_client,
            &self.config.site_base_url,
        )
        .execute(email)
        .await?;

        Ok(())
    }

    /// Read-only link check used to gate the update-password form.
    #[tracing::instrument(name = "Validate reset token", skip_all)]
    pub async fn validate_reset_token(&self, token: &str) -> Result<UserId, AuthServiceError> {
        let user_id = ValidateResetTokenUseCase::new(&self.credential_store)
            .execute(token)
            .await?;

        Ok(user_id)
    }

    #[tracing::instrument(name = "Update password", skip_all)]
    pub async fn update_password(
        &self,
        token: &str,
        password: Secret<String>,
        password_confirm: Secret<String>,
    ) -> Result<(), AuthServiceError> {
        let password = Password::parse_with_confirm(
            password,
            &password_confirm,
            &self.config.password_policy,
        )?;

        UpdatePasswordUseCase::new(&self.credential_store, &self.password_hasher)
            .execute(token, password)
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "Begin two-factor enrollment", skip_all)]
    pub async fn begin_two_factor_enrollment(
        &self,
        session: &SessionToken,
    ) -> Result<TwoFactorEnrollment, AuthServiceError> {
        let identity = self.current_session(session).await?;

        let enrollment = BeginTwoFactorEnrollmentUseCase::new(
            &self.credential_store,
            &self.totp_engine,
            &self.config.totp_issuer,
        )
        .execute(identity.user_id)
        .await?;

        Ok(enrollment)
    }

    #[tracing::instrument(name = "Confirm two-factor enrollment", skip_all)]
    pub async fn confirm_two_factor_enrollment(
        &self,
        session: &SessionToken,
        code: &str,
    ) -> Result<(), AuthServiceError> {
        let identity = self.current_session(session).await?;

        ConfirmTwoFactorEnrollmentUseCase::new(&self.credential_store, &self.totp_engine)
            .execute(identity.user_id, code)
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "Disable two-factor", skip_all)]
    pub async fn disable_two_factor(
        &self,
        session: &SessionToken,
    ) -> Result<(), AuthServiceError> {
        let identity = self.current_session(session).await?;

        DisableTwoFactorUseCase::new(&self.credential_store)
            .execute(identity.user_id)
            .await?;

        Ok(())
    }
}
