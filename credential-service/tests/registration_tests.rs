mod common;

use chrono::Utc;
use common::expect_failure_message;
use common::expect_success;
use common::TestApp;
use common::LIFETIME_HOURS;
use credential_service::credentials::errors::AuthError;
use credential_service::credentials::models::ErrorKind;
use credential_service::credentials::models::RegisterCommand;
use credential_service::credentials::ports::AuthServicePort;
use credential_service::credentials::ports::UserRepository;
use http::StatusCode;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn();

    let outcome = app
        .register("nicola", "nicola@example.com", "Pass_word1")
        .await
        .expect("Registration failed");

    assert_eq!(outcome.status_code(), StatusCode::OK);
    let success = expect_success(outcome);
    assert_eq!(success.username, "nicola");
    assert!(!success.token.is_empty());

    let stored = app
        .repository
        .get_by_username("nicola")
        .await
        .unwrap()
        .expect("User was not stored");
    assert_eq!(stored.id, success.user_id);
    assert_ne!(stored.password_hash, "Pass_word1");
    assert!(!stored.password_salt.is_empty());
}

#[tokio::test]
async fn test_register_short_username() {
    let app = TestApp::spawn();

    let outcome = app
        .register("ab", "user@example.com", "Password123")
        .await
        .unwrap();

    assert_eq!(outcome.error_kind(), Some(ErrorKind::Validation));
    assert_eq!(outcome.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        expect_failure_message(&outcome),
        "Username must be at least 3 characters long."
    );
    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn();

    let first = app
        .register("nicola", "nicola@example.com", "Password123")
        .await
        .unwrap();
    assert!(first.is_success());

    let second = app
        .register("nicola", "another@example.com", "Password123")
        .await
        .unwrap();

    assert_eq!(second.error_kind(), Some(ErrorKind::Conflict));
    assert_eq!(second.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        expect_failure_message(&second),
        "This username is already taken. Please choose a different one."
    );
    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_register_duplicate_email_any_case() {
    let app = TestApp::spawn();

    app.register("nicola", "nicola@example.com", "Password123")
        .await
        .unwrap();

    let outcome = app
        .register("nicola2", "NICOLA@Example.COM", "Password123")
        .await
        .unwrap();

    assert_eq!(outcome.error_kind(), Some(ErrorKind::Conflict));
    assert_eq!(
        expect_failure_message(&outcome),
        "This email is already registered. Please use a different email address."
    );
}

#[tokio::test]
async fn test_register_normalizes_email() {
    let app = TestApp::spawn();

    let success = expect_success(
        app.register("tester", " Test@EXAMPLE.com ", "Password123")
            .await
            .unwrap(),
    );

    let stored = app
        .repository
        .get_by_username("tester")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, success.user_id);
    assert_eq!(stored.email, "test@example.com");
    assert!(app
        .repository
        .email_exists("test@example.com")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_register_trims_username() {
    let app = TestApp::spawn();

    let success = expect_success(
        app.register("  spaced  ", "spaced@example.com", "Password123")
            .await
            .unwrap(),
    );

    assert_eq!(success.username, "spaced");
}

#[tokio::test]
async fn test_register_token_claims() {
    let app = TestApp::spawn();

    let before = Utc::now().timestamp();
    let success = expect_success(
        app.register("claims_user", "claims@example.com", "Password123")
            .await
            .unwrap(),
    );

    let claims = app
        .token_verifier
        .decode(&success.token)
        .expect("Token should verify");

    assert_eq!(claims.sub, success.user_id.to_string());
    assert_eq!(claims.nameid, success.user_id.to_string());
    assert_eq!(claims.name, "claims_user");
    assert_eq!(claims.iss, "credential-service-tests");
    assert_eq!(claims.aud, "credential-service-clients");
    assert!((claims.iat - before).abs() <= 5);
    assert_eq!(claims.exp, claims.iat + LIFETIME_HOURS * 3600);
}

#[tokio::test]
async fn test_register_cancelled_does_not_store() {
    let app = TestApp::spawn();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = app
        .service
        .register(
            RegisterCommand::new("nicola", "nicola@example.com", "Password123"),
            &cancel,
        )
        .await;

    assert!(matches!(result, Err(AuthError::Cancelled)));
    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_concurrent_registrations_of_same_username() {
    let app = std::sync::Arc::new(TestApp::spawn());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let app = std::sync::Arc::clone(&app);
            tokio::spawn(async move {
                app.register("contended", &format!("user{}@example.com", i), "Password123")
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        let outcome = handle.await.unwrap().expect("No infrastructure error expected");
        match outcome.error_kind() {
            None => successes += 1,
            Some(kind) => assert_eq!(kind, ErrorKind::Conflict),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_register_rejects_multi_label_email_domain() {
    let app = TestApp::spawn();

    let outcome = app
        .register("nicola", "nicola@mail.example.co.uk", "Password123")
        .await
        .unwrap();

    assert_eq!(outcome.error_kind(), Some(ErrorKind::Validation));
    assert_eq!(
        expect_failure_message(&outcome),
        "Please enter a valid email address."
    );
    assert!(app.repository.is_empty().await);
}
