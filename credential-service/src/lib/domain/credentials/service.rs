use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::credentials::errors::AuthError;
use crate::credentials::errors::ConflictError;
use crate::credentials::errors::InvalidCredentials;
use crate::credentials::errors::RepositoryError;
use crate::credentials::models::AuthOutcome;
use crate::credentials::models::HashedPassword;
use crate::credentials::models::LoginCommand;
use crate::credentials::models::NewUser;
use crate::credentials::models::RegisterCommand;
use crate::credentials::models::User;
use crate::credentials::ports::AuthServicePort;
use crate::credentials::ports::PasswordHasher;
use crate::credentials::ports::TokenIssuer;
use crate::credentials::ports::UserRepository;
use crate::credentials::validation::CredentialValidator;

/// Domain service implementation for registration and login.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Holds no mutable state, so one instance serves concurrent requests.
pub struct AuthService<UR, PH, TI>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TI: TokenIssuer,
{
    repository: Arc<UR>,
    password_hasher: Arc<PH>,
    token_issuer: Arc<TI>,
    validator: CredentialValidator,
}

impl<UR, PH, TI> AuthService<UR, PH, TI>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TI: TokenIssuer,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Password hashing implementation
    /// * `token_issuer` - Access token implementation
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(repository: Arc<UR>, password_hasher: Arc<PH>, token_issuer: Arc<TI>) -> Self {
        Self {
            repository,
            password_hasher,
            token_issuer,
            validator: CredentialValidator::new(),
        }
    }

    async fn register_user(
        &self,
        command: RegisterCommand,
        cancel: &CancellationToken,
    ) -> Result<AuthOutcome, AuthError> {
        ensure_active(cancel)?;

        if let Err(failure) = self.validator.validate_registration(
            &command.username,
            &command.email,
            &command.password,
        ) {
            tracing::debug!(reason = %failure, "Registration rejected by validation");
            return Ok(AuthOutcome::failure(failure));
        }

        let username = command.username.trim().to_string();
        let email = command.email.trim().to_lowercase();

        ensure_active(cancel)?;
        if self.repository.username_exists(&username).await? {
            return Ok(conflict(ConflictError::UsernameTaken, &username));
        }

        ensure_active(cancel)?;
        if self.repository.email_exists(&email).await? {
            return Ok(conflict(ConflictError::EmailTaken, &username));
        }

        ensure_active(cancel)?;
        let hashed = self.hash_password(command.password).await?;
        let new_user = NewUser::new(&username, &email, hashed.hash, hashed.salt)?;

        ensure_active(cancel)?;
        let user = match self.repository.add(new_user).await {
            Ok(user) => user,
            // Lost a race with a concurrent registration
            Err(RepositoryError::UsernameAlreadyExists(_)) => {
                return Ok(conflict(ConflictError::UsernameTaken, &username));
            }
            Err(RepositoryError::EmailAlreadyExists(_)) => {
                return Ok(conflict(ConflictError::EmailTaken, &username));
            }
            Err(e) => return Err(e.into()),
        };

        let token = self.token_issuer.issue(user.id, &user.username)?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(AuthOutcome::success(token, &user))
    }

    async fn authenticate(
        &self,
        command: LoginCommand,
        cancel: &CancellationToken,
    ) -> Result<AuthOutcome, AuthError> {
        ensure_active(cancel)?;

        if let Err(failure) = self
            .validator
            .validate_login(&command.username, &command.password)
        {
            tracing::debug!(reason = %failure, "Login rejected by validation");
            return Ok(AuthOutcome::failure(failure));
        }

        let username = command.username.trim();

        ensure_active(cancel)?;
        let Some(user) = self.repository.get_by_username(username).await? else {
            tracing::warn!(username = %username, "Login failed: unknown username");
            return Ok(AuthOutcome::failure(InvalidCredentials));
        };

        ensure_active(cancel)?;
        if !self.verify_password(command.password, &user).await? {
            tracing::warn!(user_id = %user.id, "Login failed: wrong password");
            return Ok(AuthOutcome::failure(InvalidCredentials));
        }

        let token = self.token_issuer.issue(user.id, &user.username)?;

        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(AuthOutcome::success(token, &user))
    }

    // Argon2 is CPU bound, so it runs on the blocking pool.
    async fn hash_password(&self, password: String) -> Result<HashedPassword, AuthError> {
        let hasher = Arc::clone(&self.password_hasher);

        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Worker(e.to_string()))??;

        Ok(hashed)
    }

    async fn verify_password(&self, password: String, user: &User) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.password_hasher);
        let stored_hash = user.password_hash.clone();
        let stored_salt = user.password_salt.clone();

        let valid = tokio::task::spawn_blocking(move || {
            hasher.verify(&password, &stored_hash, &stored_salt)
        })
        .await
        .map_err(|e| AuthError::Worker(e.to_string()))??;

        Ok(valid)
    }
}

#[async_trait]
impl<UR, PH, TI> AuthServicePort for AuthService<UR, PH, TI>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TI: TokenIssuer,
{
    async fn register(
        &self,
        command: RegisterCommand,
        cancel: &CancellationToken,
    ) -> Result<AuthOutcome, AuthError> {
        self.register_user(command, cancel)
            .await
            .inspect_err(|e| log_aborted("register", e))
    }

    async fn login(
        &self,
        command: LoginCommand,
        cancel: &CancellationToken,
    ) -> Result<AuthOutcome, AuthError> {
        self.authenticate(command, cancel)
            .await
            .inspect_err(|e| log_aborted("login", e))
    }
}

fn ensure_active(cancel: &CancellationToken) -> Result<(), AuthError> {
    if cancel.is_cancelled() {
        Err(AuthError::Cancelled)
    } else {
        Ok(())
    }
}

fn conflict(conflict: ConflictError, username: &str) -> AuthOutcome {
    tracing::warn!(username = %username, reason = %conflict, "Registration conflict");
    AuthOutcome::failure(conflict)
}

fn log_aborted(operation: &str, error: &AuthError) {
    match error {
        AuthError::Cancelled => tracing::debug!(operation, "Operation cancelled by caller"),
        _ => tracing::error!(operation, error = %error, "Operation aborted"),
    }
}
