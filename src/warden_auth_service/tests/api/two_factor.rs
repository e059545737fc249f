use warden_auth_service::AuthServiceError;

use crate::helpers::{random_email, secret, spawn_service, totp_code_for};

#[tokio::test]
async fn enrollment_confirmation_gates_activation_on_a_valid_code() {
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

    let enrollment = app
        .service
        .begin_two_factor_enrollment(&session)
        .await
        .unwrap();
    assert!(enrollment.provisioning_uri.starts_with("otpauth://totp/"));
    assert!(enrollment.provisioning_uri.contains("Warden"));

    let wrong = app
        .service
        .confirm_two_factor_enrollment(&session, "000000")
        .await;
    assert_eq!(wrong.unwrap_err(), AuthServiceError::InvalidOtp);

    // Activation did not happen: precheck still reports 2FA off.
    let precheck = app
        .service
        .precheck(email.clone(), secret("Secret123!"))
        .await
        .unwrap();
    assert!(!precheck.two_factor_activated);

    let code = totp_code_for(&enrollment.secret);
    app.service
        .confirm_two_factor_enrollment(&session, &code)
        .await
        .unwrap();

    let precheck = app
        .service
        .precheck(email, secret("Secret123!"))
        .await
        .unwrap();
    assert!(precheck.two_factor_activated);
}

#[tokio::test]
async fn retried_enrollment_reuses_the_same_secret() {
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

    let first = app
        .service
        .begin_two_factor_enrollment(&session)
        .await
        .unwrap();
    let second = app
        .service
        .begin_two_factor_enrollment(&session)
        .await
        .unwrap();

    assert_eq!(first.secret, second.secret);
}

#[tokio::test]
async fn active_two_factor_requires_a_code_at_login() {
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
    let enrollment = app
        .service
        .begin_two_factor_enrollment(&session)
        .await
        .unwrap();
    let code = totp_code_for(&enrollment.secret);
    app.service
        .confirm_two_factor_enrollment(&session, &code)
        .await
        .unwrap();

    // Without a code the password alone is not enough.
    assert_eq!(
        app.service
            .login(email.clone(), secret("Secret123!"), None)
            .await
            .unwrap_err(),
        AuthServiceError::InvalidOtp
    );
    // A wrong code after an accepted password is still InvalidOtp.
    assert_eq!(
        app.service
            .login(
                email.clone(),
                secret("Secret123!"),
                Some("000000".to_string())
            )
            .await
            .unwrap_err(),
        AuthServiceError::InvalidOtp
    );
    // A wrong password never reaches the code check.
    assert_eq!(
        app.service
            .login(
                email.clone(),
                secret("WrongPass1!"),
                Some(totp_code_for(&enrollment.secret))
            )
            .await
            .unwrap_err(),
        AuthServiceError::InvalidCredentials
    );

    let session = app
        .service
        .login(
            email,
            secret("Secret123!"),
            Some(totp_code_for(&enrollment.secret)),
        )
        .await
        .unwrap();
    assert!(app.service.current_session(&session).await.is_ok());
}

#[tokio::test]
async fn disable_restores_password_only_login_and_keeps_the_secret() {
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
    let enrollment = app
        .service
        .begin_two_factor_enrollment(&session)
        .await
        .unwrap();
    let code = totp_code_for(&enrollment.secret);
    app.service
        .confirm_two_factor_enrollment(&session, &code)
        .await
        .unwrap();

    app.service.disable_two_factor(&session).await.unwrap();

    let session = app
        .service
        .login(email, secret("Secret123!"), None)
        .await
        .unwrap();

    // Re-enrollment after disable is lenient: the retained secret comes
    // back, no fresh QR scan required.
    let again = app
        .service
        .begin_two_factor_enrollment(&session)
        .await
        .unwrap();
    assert_eq!(again.secret, enrollment.secret);
}

#[tokio::test]
async fn two_factor_management_requires_a_session() {
    let app = spawn_service();
    let forged = warden_core::SessionToken::from(secret("forged"));

    assert_eq!(
        app.service
            .begin_two_factor_enrollment(&forged)
            .await
            .unwrap_err(),
        AuthServiceError::Unauthorized
    );
    assert_eq!(
        app.service
            .confirm_two_factor_enrollment(&forged, "123456")
            .await
            .unwrap_err(),
        AuthServiceError::Unauthorized
    );
    assert_eq!(
        app.service.disable_two_factor(&forged).await.unwrap_err(),
        AuthServiceError::Unauthorized
    );
}

#[tokio::test]
async fn confirming_before_enrollment_is_a_validation_error() {
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
        .confirm_two_factor_enrollment(&session, "123456")
        .await;

    assert!(matches!(result, Err(AuthServiceError::Validation(_))));
}
