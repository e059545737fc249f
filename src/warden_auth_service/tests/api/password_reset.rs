use warden_auth_service::AuthServiceError;

use crate::helpers::{extract_reset_token, random_email, secret, spawn_service};

#[tokio::test]
async fn full_reset_flow_rotates_the_password() {
    let app = spawn_service();
    let email = random_email();

    app.service
        .register(email.clone(), secret("Secret123!"), secret("Secret123!"))
        .await
        .unwrap();

    app.service
        .request_password_reset(email.clone())
        .await
        .unwrap();

    let sent = app.email_client.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Your password reset request");
    assert!(
        sent[0]
            .content
            .contains("https://warden.example.com/update-password?token=")
    );

    let token = extract_reset_token(&app.email_client).await;
    app.service.validate_reset_token(&token).await.unwrap();

    app.service
        .update_password(&token, secret("Changed456?"), secret("Changed456?"))
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
async fn a_consumed_token_cannot_be_used_again() {
    let app = spawn_service();
    let email = random_email();

    app.service
        .register(email.clone(), secret("Secret123!"), secret("Secret123!"))
        .await
        .unwrap();
    app.service.request_password_reset(email).await.unwrap();
    let token = extract_reset_token(&app.email_client).await;

    app.service
        .update_password(&token, secret("Changed456?"), secret("Changed456?"))
        .await
        .unwrap();

    assert_eq!(
        app.service
            .update_password(&token, secret("Third789$"), secret("Third789$"))
            .await
            .unwrap_err(),
        AuthServiceError::TokenInvalid
    );
    assert_eq!(
        app.service.validate_reset_token(&token).await.unwrap_err(),
        AuthServiceError::TokenInvalid
    );
}

#[tokio::test]
async fn a_second_request_invalidates_the_first_link() {
    let app = spawn_service();
    let email = random_email();

    app.service
        .register(email.clone(), secret("Secret123!"), secret("Secret123!"))
        .await
        .unwrap();

    app.service
        .request_password_reset(email.clone())
        .await
        .unwrap();
    let first_token = extract_reset_token(&app.email_client).await;

    app.service.request_password_reset(email).await.unwrap();
    let second_token = extract_reset_token(&app.email_client).await;

    assert_ne!(first_token, second_token);
    assert_eq!(
        app.service
            .validate_reset_token(&first_token)
            .await
            .unwrap_err(),
        AuthServiceError::TokenInvalid
    );
    assert!(
        app.service
            .validate_reset_token(&second_token)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn unknown_address_gets_the_uniform_response_and_no_email() {
    let app = spawn_service();

    let result = app
        .service
        .request_password_reset(secret("nobody@example.com"))
        .await;

    assert!(result.is_ok());
    assert!(app.email_client.sent().await.is_empty());
}

#[tokio::test]
async fn garbage_tokens_are_invalid() {
    let app = spawn_service();

    assert_eq!(
        app.service
            .validate_reset_token("deadbeef")
            .await
            .unwrap_err(),
        AuthServiceError::TokenInvalid
    );
    assert_eq!(
        app.service
            .update_password("deadbeef", secret("Changed456?"), secret("Changed456?"))
            .await
            .unwrap_err(),
        AuthServiceError::TokenInvalid
    );
}
