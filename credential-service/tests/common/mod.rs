use std::sync::Arc;
use std::sync::Once;

use auth::JwtIssuer;
use auth::JwtOptions;
use credential_service::bootstrap::build_auth_service;
use credential_service::bootstrap::DefaultAuthService;
use credential_service::config::Config;
use credential_service::config::HashingConfig;
use credential_service::config::JwtConfig;
use credential_service::credentials::errors::AuthError;
use credential_service::credentials::models::AuthOutcome;
use credential_service::credentials::models::AuthSuccess;
use credential_service::credentials::models::LoginCommand;
use credential_service::credentials::models::RegisterCommand;
use credential_service::credentials::ports::AuthServicePort;
use credential_service::repositories::InMemoryUserRepository;
use tokio_util::sync::CancellationToken;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const LIFETIME_HOURS: i64 = 6;

static TRACING: Once = Once::new();

/// Service wired to the in-memory store with real hashing and signing.
pub struct TestApp {
    pub service: DefaultAuthService<InMemoryUserRepository>,
    pub repository: Arc<InMemoryUserRepository>,
    pub token_verifier: JwtIssuer,
}

impl TestApp {
    pub fn spawn() -> Self {
        TRACING.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("credential_service=debug")
                .with_test_writer()
                .try_init();
        });

        let config = Config {
            jwt: JwtConfig {
                key: JWT_SECRET.to_string(),
                issuer: "credential-service-tests".to_string(),
                audience: "credential-service-clients".to_string(),
                access_token_lifetime_hours: LIFETIME_HOURS,
            },
            // Cheap Argon2 costs keep the suite fast
            hashing: HashingConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
        };

        let repository = Arc::new(InMemoryUserRepository::new());
        let service = build_auth_service(&config, Arc::clone(&repository))
            .expect("Failed to build auth service");
        let token_verifier =
            JwtIssuer::new(&JwtOptions::from(&config.jwt)).expect("Failed to build verifier");

        Self {
            service,
            repository,
            token_verifier,
        }
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, AuthError> {
        self.service
            .register(
                RegisterCommand::new(username, email, password),
                &CancellationToken::new(),
            )
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        self.service
            .login(
                LoginCommand::new(username, password),
                &CancellationToken::new(),
            )
            .await
    }
}

pub fn expect_success(outcome: AuthOutcome) -> AuthSuccess {
    match outcome {
        AuthOutcome::Success(success) => success,
        AuthOutcome::Failure(failure) => panic!("expected success, got {:?}", failure),
    }
}

pub fn expect_failure_message(outcome: &AuthOutcome) -> String {
    match outcome {
        AuthOutcome::Failure(failure) => failure.message.clone(),
        AuthOutcome::Success(success) => panic!("expected failure, got {:?}", success),
    }
}
