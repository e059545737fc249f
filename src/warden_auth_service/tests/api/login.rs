use warden_auth_service::AuthServiceError;

use crate::helpers::{random_email, secret, spawn_service};

#[tokio::test]
async fn unknown_email_and_wrong_password_fail_identically() {
    let app = spawn_service();
    let email = random_email();

    app.service
        .register(email.clone(), secret("Secret123!"), secret("Secret123!"))
        .await
        .unwrap();

    let unknown = app
        .service
        .login(secret("nobody@example.com"), secret("Secret123!"), None)
        .await
        .unwrap_err();
    let wrong = app
        .service
        .login(email, secret("WrongPass1!"), None)
        .await
        .unwrap_err();

    assert_eq!(unknown, AuthServiceError::InvalidCredentials);
    assert_eq!(wrong, AuthServiceError::InvalidCredentials);
}

#[tokio::test]
async fn malformed_email_fails_like_unknown_credentials() {
    let app = spawn_service();

    let result = app
        .service
        .login(secret("not-an-email"), secret("Secret123!"), None)
        .await;

    assert_eq!(result.unwrap_err(), AuthServiceError::InvalidCredentials);
}

#[tokio::test]
async fn a_stray_otp_code_is_ignored_when_two_factor_is_inactive() {
    let app = spawn_service();
    let email = random_email();

    app.service
        .register(email.clone(), secret("Secret123!"), secret("Secret123!"))
        .await
        .unwrap();

    let result = app
        .service
        .login(email, secret("Secret123!"), Some("000000".to_string()))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn session_tokens_are_rejected_after_tampering() {
    let app = spawn_service();
    let email = random_email();

    app.service
        .register(email.clone(), secret("Secret123!"), secret("Secret123!"))
        .await
        .unwrap();
    let _session = app
        .service
        .login(email, secret("Secret123!"), None)
        .await
        .unwrap();

    let forged = warden_core::SessionToken::from(secret("not-a-real-token"));
    let result = app.service.current_session(&forged).await;

    assert_eq!(result.unwrap_err(), AuthServiceError::Unauthorized);
}
