mod common;

use common::expect_failure_message;
use common::expect_success;
use common::TestApp;
use credential_service::credentials::errors::AuthError;
use credential_service::credentials::models::ErrorKind;
use credential_service::credentials::models::LoginCommand;
use credential_service::credentials::ports::AuthServicePort;
use http::StatusCode;
use tokio_util::sync::CancellationToken;

const INVALID_CREDENTIALS: &str =
    "Invalid username or password. Please check your credentials and try again.";

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::spawn();

    let registered = expect_success(
        app.register("nicola", "nicola@example.com", "Pass_word1")
            .await
            .unwrap(),
    );
    let logged_in = expect_success(app.login("nicola", "Pass_word1").await.unwrap());

    assert_eq!(logged_in.user_id, registered.user_id);
    assert_eq!(logged_in.username, registered.username);

    let first = app.token_verifier.decode(&registered.token).unwrap();
    let second = app.token_verifier.decode(&logged_in.token).unwrap();
    assert_eq!(first.sub, second.sub);
    assert_ne!(first.jti, second.jti);
}

#[tokio::test]
async fn test_login_with_surrounding_whitespace_in_username() {
    let app = TestApp::spawn();
    app.register("nicola", "nicola@example.com", "Pass_word1")
        .await
        .unwrap();

    let outcome = app.login("  nicola ", "Pass_word1").await.unwrap();

    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user_match() {
    let app = TestApp::spawn();
    app.register("nicola", "nicola@example.com", "Pass_word1")
        .await
        .unwrap();

    let wrong_password = app.login("nicola", "Wrong_pass1").await.unwrap();
    let unknown_user = app.login("nobody", "Pass_word1").await.unwrap();

    for outcome in [&wrong_password, &unknown_user] {
        assert_eq!(outcome.error_kind(), Some(ErrorKind::Unauthorized));
        assert_eq!(outcome.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(expect_failure_message(outcome), INVALID_CREDENTIALS);
    }
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_login_username_is_case_sensitive() {
    let app = TestApp::spawn();
    app.register("nicola", "nicola@example.com", "Pass_word1")
        .await
        .unwrap();

    let outcome = app.login("Nicola", "Pass_word1").await.unwrap();

    assert_eq!(outcome.error_kind(), Some(ErrorKind::Unauthorized));
}

#[tokio::test]
async fn test_login_requires_username_and_password() {
    let app = TestApp::spawn();

    let missing_username = app.login("   ", "Pass_word1").await.unwrap();
    assert_eq!(missing_username.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        expect_failure_message(&missing_username),
        "Username is required."
    );

    let missing_password = app.login("nicola", "").await.unwrap();
    assert_eq!(missing_password.error_kind(), Some(ErrorKind::Validation));
    assert_eq!(
        expect_failure_message(&missing_password),
        "Password is required."
    );
}

#[tokio::test]
async fn test_login_cancelled() {
    let app = TestApp::spawn();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = app
        .service
        .login(LoginCommand::new("nicola", "Pass_word1"), &cancel)
        .await;

    assert!(matches!(result, Err(AuthError::Cancelled)));
}
