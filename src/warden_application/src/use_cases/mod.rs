pub mod change_password;
pub mod login;
pub mod precheck;
pub mod register;
pub mod request_password_reset;
pub mod two_factor;
pub mod update_password;
pub mod validate_reset_token;

// Re-export for convenience
pub use change_password::{ChangePasswordError, ChangePasswordUseCase};
pub use login::{LoginError, LoginUseCase};
pub use precheck::{PrecheckError, PrecheckResponse, PrecheckUseCase};
pub use register::{RegisterError, RegisterUseCase};
pub use request_password_reset::{RequestPasswordResetError, RequestPasswordResetUseCase};
pub use two_factor::{
    BeginTwoFactorEnrollmentUseCase, ConfirmTwoFactorEnrollmentUseCase, DisableTwoFactorUseCase,
    TwoFactorEnrollment, TwoFactorError,
};
pub use update_password::{UpdatePasswordError, UpdatePasswordUseCase};
pub use validate_reset_token::{ValidateResetTokenError, ValidateResetTokenUseCase};
