pub mod use_cases;

pub use use_cases::{
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    login::{LoginError, LoginUseCase},
    precheck::{PrecheckError, PrecheckResponse, PrecheckUseCase},
    register::{RegisterError, RegisterUseCase},
    request_password_reset::{RequestPasswordResetError, RequestPasswordResetUseCase},
    two_factor::{
        BeginTwoFactorEnrollmentUseCase, ConfirmTwoFactorEnrollmentUseCase,
        DisableTwoFactorUseCase, TwoFactorEnrollment, TwoFactorError,
    },
    update_password::{UpdatePasswordError, UpdatePasswordUseCase},
    validate_reset_token::{ValidateResetTokenError, ValidateResetTokenUseCase},
};
