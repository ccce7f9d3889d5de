use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::credentials::errors::AuthError;
use crate::credentials::errors::PasswordError;
use crate::credentials::errors::RepositoryError;
use crate::credentials::errors::TokenError;
use crate::credentials::models::AuthOutcome;
use crate::credentials::models::HashedPassword;
use crate::credentials::models::LoginCommand;
use crate::credentials::models::NewUser;
use crate::credentials::models::RegisterCommand;
use crate::credentials::models::User;
use crate::credentials::models::UserId;

/// Port for authentication use-cases.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first access token.
    ///
    /// # Arguments
    /// * `command` - Raw username, email and password
    /// * `cancel` - Caller cancellation; checked before any store or hashing work
    ///
    /// # Returns
    /// `Success` with a token, or a `Validation` / `Conflict` failure
    ///
    /// # Errors
    /// * `Cancelled` - Token was cancelled
    /// * `Repository` / `Password` / `Token` / `InvalidUser` / `Worker` - Infrastructure failure
    async fn register(
        &self,
        command: RegisterCommand,
        cancel: &CancellationToken,
    ) -> Result<AuthOutcome, AuthError>;

    /// Authenticate an existing account.
    ///
    /// # Arguments
    /// * `command` - Raw username and password
    /// * `cancel` - Caller cancellation; checked before any store or hashing work
    ///
    /// # Returns
    /// `Success` with a token, or a `Validation` / `Unauthorized` failure
    ///
    /// # Errors
    /// * `Cancelled` - Token was cancelled
    /// * `Repository` / `Password` / `Token` / `Worker` - Infrastructure failure
    async fn login(
        &self,
        command: LoginCommand,
        cancel: &CancellationToken,
    ) -> Result<AuthOutcome, AuthError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations must enforce username and email uniqueness themselves;
/// the service's existence checks are only a pre-check.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage, assigning its identity.
    ///
    /// # Returns
    /// Stored user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Storage` - Storage operation failed
    async fn add(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Retrieve user by exact username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Check whether a username is already stored (case-sensitive).
    async fn username_exists(&self, username: &str) -> Result<bool, RepositoryError>;

    /// Check whether a normalized email is already stored.
    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError>;
}

/// Salted, irreversible password hashing.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Hash a password with a fresh salt.
    fn hash(&self, password: &str) -> Result<HashedPassword, PasswordError>;

    /// Check a password against stored hash material.
    ///
    /// A wrong password is `Ok(false)`; only malformed stored data is an error.
    fn verify(
        &self,
        password: &str,
        stored_hash: &str,
        stored_salt: &str,
    ) -> Result<bool, PasswordError>;
}

/// Signed access token issuing.
pub trait TokenIssuer: Send + Sync + 'static {
    fn issue(&self, user_id: UserId, username: &str) -> Result<String, TokenError>;
}
