//! Wiring of the auth service from configuration.

use std::sync::Arc;

use auth::Argon2PasswordHasher;
use auth::JwtIssuer;
use auth::JwtOptions;
use thiserror::Error;

use crate::config::Config;
use crate::credentials::ports::UserRepository;
use crate::credentials::service::AuthService;

/// Auth service backed by Argon2id hashing and HS256 tokens.
pub type DefaultAuthService<UR> = AuthService<UR, Argon2PasswordHasher, JwtIssuer>;

/// Misconfiguration detected while building the service.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid token configuration: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Invalid hashing configuration: {0}")]
    Hashing(#[from] auth::PasswordError),
}

/// Build the auth service, validating signing and hashing settings up front.
///
/// # Errors
/// * `Token` - Key shorter than 32 bytes, blank issuer/audience, lifetime out of range
/// * `Hashing` - Argon2 rejected the cost parameters
pub fn build_auth_service<UR: UserRepository>(
    config: &Config,
    repository: Arc<UR>,
) -> Result<DefaultAuthService<UR>, StartupError> {
    let token_issuer = JwtIssuer::new(&JwtOptions::from(&config.jwt))?;
    let password_hasher = Argon2PasswordHasher::with_params(config.hashing.into())?;

    tracing::info!(
        issuer = %config.jwt.issuer,
        audience = %config.jwt.audience,
        access_token_lifetime_hours = config.jwt.access_token_lifetime_hours,
        argon2_memory_kib = config.hashing.memory_kib,
        argon2_iterations = config.hashing.iterations,
        argon2_parallelism = config.hashing.parallelism,
        "Auth service configured"
    );

    Ok(AuthService::new(
        repository,
        Arc::new(password_hasher),
        Arc::new(token_issuer),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HashingConfig;
    use crate::config::JwtConfig;
    use crate::outbound::repositories::InMemoryUserRepository;

    fn config(key: &str) -> Config {
        Config {
            jwt: JwtConfig {
                key: key.to_string(),
                issuer: "credential-service".to_string(),
                audience: "credential-service".to_string(),
                access_token_lifetime_hours: 24,
            },
            hashing: HashingConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
        }
    }

    #[test]
    fn test_build_with_valid_config() {
        let result = build_auth_service(
            &config("test-secret-key-for-jwt-signing-at-least-32-bytes"),
            Arc::new(InMemoryUserRepository::new()),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_short_key_fails_at_startup() {
        let result = build_auth_service(
            &config("base64:c2hvcnQ="),
            Arc::new(InMemoryUserRepository::new()),
        );

        assert!(matches!(
            result,
            Err(StartupError::Token(auth::JwtError::KeyTooShort { .. }))
        ));
    }

    #[test]
    fn test_invalid_lifetime_fails_at_startup() {
        let mut config = config("test-secret-key-for-jwt-signing-at-least-32-bytes");
        config.jwt.access_token_lifetime_hours = 169;

        let result = build_auth_service(&config, Arc::new(InMemoryUserRepository::new()));

        assert!(matches!(
            result,
            Err(StartupError::Token(auth::JwtError::InvalidLifetime { .. }))
        ));
    }

    #[test]
    fn test_invalid_hashing_params_fail_at_startup() {
        let mut config = config("test-secret-key-for-jwt-signing-at-least-32-bytes");
        config.hashing.iterations = 0;

        let result = build_auth_service(&config, Arc::new(InMemoryUserRepository::new()));

        assert!(matches!(result, Err(StartupError::Hashing(_))));
    }
}
