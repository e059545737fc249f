use secrecy::ExposeSecret;
use warden_auth_service::AuthServiceError;

use crate::helpers::{random_email, secret, spawn_service};

#[tokio::test]
async fn register_precheck_authenticate_round_trip() {
    let app = spawn_service();

    let user_id = app
        .service
        .register(
            secret("alice@example.com"),
            secret("Secret123!"),
            secret("Secret123!"),
        )
        .await
        .unwrap();

    let precheck = app
        .service
        .precheck(secret("alice@example.com"), secret("Secret123!"))
        .await
        .unwrap();
    assert!(!precheck.two_factor_activated);

    let session = app
        .service
        .login(secret("alice@example.com"), secret("Secret123!"), None)
        .await
        .unwrap();
    let identity = app.service.current_session(&session).await.unwrap();

    assert_eq!(identity.user_id, user_id);
    assert_eq!(
        identity.email.as_ref().expose_secret(),
        "alice@example.com"
    );
}

#[tokio::test]
async fn duplicate_registration_fails_and_original_credentials_survive() {
    let app = spawn_service();
    let email = random_email();

    app.service
        .register(email.clone(), secret("Secret123!"), secret("Secret123!"))
        .await
        .unwrap();

    let result = app
        .service
        .register(email.clone(), secret("Other456?"), secret("Other456?"))
        .await;
    assert_eq!(result.unwrap_err(), AuthServiceError::DuplicateEmail);

    // The original password hash was left untouched by the failed attempt.
    assert!(
        app.service
            .login(email.clone(), secret("Secret123!"), None)
            .await
            .is_ok()
    );
    assert_eq!(
        app.service
            .login(email, secret("Other456?"), None)
            .await
            .unwrap_err(),
        AuthServiceError::InvalidCredentials
    );
}

#[tokio::test]
async fn registration_enforces_email_syntax() {
    let app = spawn_service();

    let result = app
        .service
        .register(
            secret("not-an-email"),
            secret("Secret123!"),
            secret("Secret123!"),
        )
        .await;

    assert!(matches!(result, Err(AuthServiceError::Validation(_))));
}

#[tokio::test]
async fn registration_enforces_confirm_match_and_policy() {
    let app = spawn_service();

    let mismatch = app
        .service
        .register(random_email(), secret("Secret123!"), secret("Secret123?"))
        .await;
    assert!(matches!(mismatch, Err(AuthServiceError::Validation(_))));

    let too_short = app
        .service
        .register(random_email(), secret("abc"), secret("abc"))
        .await;
    assert!(matches!(too_short, Err(AuthServiceError::Validation(_))));
}
