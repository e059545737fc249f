use warden_auth_service::AuthServiceError;

use crate::helpers::{random_email, secret, spawn_service};

#[tokio::test]
async fn wrong_current_password_leaves_the_stored_hash_unchanged() {
    let app = spawn_service();
    let email = random_email();

    app.service
        .register(email.clone(), secret("Secret123!"), secret("Secret123!"))
        .await
        .unwrap();
    let session = app
        .service
        .login(email.clone(), secret("Secret123!"), None)
        .await
        .unwrap();

    let result = app
        .service
        .change_password(
            &session,
            secret("NotTheOldOne1!"),
            secret("Changed456?"),
            secret("Changed456?"),
        )
        .await;
    assert_eq!(result.unwrap_err(), AuthServiceError::InvalidCredentials);

    // The old password still authenticates; the attempted one does not.
    assert!(
        app.service
            .login(email.clone(), secret("Secret123!"), None)
            .await
            .is_ok()
    );
    assert_eq!(
        app.service
            .login(email, secret("Changed456?"), None)
            .await
            .unwrap_err(),
        AuthServiceError::InvalidCredentials
    );
}

#[tokio::test]
async fn correct_current_password_rotates_credentials() {
    let app = spawn_service();
    let email = random_email();

    app.service
        .register(email.clone(), secret("Secret123!"), secret("Secret123!"))
        .await
        .unwrap();
    let session = app
        .service
        .login(email.clone(), secret("Secret123!"), None)
        .await
        .unwrap();

    app.service
        .change_password(
            &session,
            secret("Secret123!"),
            secret("Changed456?"),
            secret("Changed456?"),
        )
        .await
        .unwrap();

    assert!(
        app.service
            .login(email.clone(), secret("Changed456?"), None)
            .await
            .is_ok()
    );
    assert_eq!(
        app.service
            .login(email, secret("Secret123!"), None)
            .await
            .unwrap_err(),
        AuthServiceError::InvalidCredentials
    );
}

#[tokio::test]
async fn change_password_requires_a_valid_session() {
    let app = spawn_service();

    let forged = warden_core::SessionToken::from(secret("forged"));
    let result = app
        .service
        .change_password(
            &forged,
            secret("Secret123!"),
            secret("Changed456?"),
            secret("Changed456?"),
        )
        .await;

    assert_eq!(result.unwrap_err(), AuthServiceError::Unauthorized);
}

#[tokio::test]
async fn new_password_must_satisfy_the_policy() {
    let app = spawn_service();
    let email = random_email();

    app.service
        .register(email.clone(), secret("Secret123!"), secret("Secret123!"))
        .await
        .unwrap();
    let session = app
        .service
        .login(email, secret("Secret123!"), None)
        .await
        .unwrap();

    let result = app
        .service
        .change_password(&session, secret("Secret123!"), secret("abc"), secret("abc"))
        .await;

    assert!(matches!(result, Err(AuthServiceError::Validation(_))));
}
