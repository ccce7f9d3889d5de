use thiserror::Error;

use crate::credentials::models::MAX_EMAIL_LENGTH;
use crate::credentials::models::MAX_USERNAME_LENGTH;
use crate::credentials::validation::MAX_PASSWORD_LENGTH;
use crate::credentials::validation::MIN_PASSWORD_LENGTH;
use crate::credentials::validation::MIN_USERNAME_LENGTH;

/// Rejected registration or login input.
///
/// The display text of each variant is the message shown to the user.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("Username is required.")]
    UsernameRequired,

    #[error("Username must be at least {MIN_USERNAME_LENGTH} characters long.")]
    UsernameTooShort,

    #[error("Username must not exceed {MAX_USERNAME_LENGTH} characters.")]
    UsernameTooLong,

    #[error("Username can only contain letters, numbers, and underscores.")]
    UsernameInvalidCharacters,

    #[error("Email is required.")]
    EmailRequired,

    #[error("Email must not exceed {MAX_EMAIL_LENGTH} characters.")]
    EmailTooLong,

    #[error("Please enter a valid email address.")]
    EmailInvalid,

    #[error("Password is required.")]
    PasswordRequired,

    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters long.")]
    PasswordTooShort,

    #[error("Password must not exceed {MAX_PASSWORD_LENGTH} characters.")]
    PasswordTooLong,

    #[error(
        "Password must contain at least one uppercase letter, one lowercase letter, and one number."
    )]
    PasswordTooWeak,
}

/// Registration clashes with an existing account.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConflictError {
    #[error("This username is already taken. Please choose a different one.")]
    UsernameTaken,

    #[error("This email is already registered. Please use a different email address.")]
    EmailTaken,
}

/// Unknown username or wrong password; the two are reported identically.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Invalid username or password. Please check your credentials and try again.")]
pub struct InvalidCredentials;

/// Error for User construction failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username must not exceed {max} characters, got {actual}")]
    UsernameTooLong { max: usize, actual: usize },

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email must not exceed {max} characters, got {actual}")]
    EmailTooLong { max: usize, actual: usize },

    #[error("Password hash cannot be empty")]
    EmptyPasswordHash,

    #[error("Password salt cannot be empty")]
    EmptyPasswordSalt,
}

/// Error for persistence operations
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Error for password hashing operations
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedStoredHash(String),
}

/// Error for access token operations
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Token issuing failed: {0}")]
    IssueFailed(String),
}

/// Infrastructure failure that aborted an authentication operation.
///
/// Expected rejections are never reported through this type; they are
/// `AuthOutcome::Failure` values.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Operation was cancelled")]
    Cancelled,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Invalid user: {0}")]
    InvalidUser(#[from] UserError),

    #[error("Background task failed: {0}")]
    Worker(String),
}
