use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::credentials::errors::ConflictError;
use crate::credentials::errors::InvalidCredentials;
use crate::credentials::errors::UserError;
use crate::credentials::errors::ValidationFailure;

/// Maximum username length in characters.
pub const MAX_USERNAME_LENGTH: usize = 64;

/// Maximum email length in characters.
pub const MAX_EMAIL_LENGTH: usize = 320;

/// User unique identifier, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User aggregate entity.
///
/// Represents a registered user as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub created_at: DateTime<Utc>,
}

/// A user that passed construction checks but has no identity yet.
///
/// Username is trimmed, email is trimmed and lower-cased. None of the four
/// fields is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: String,
    email: String,
    password_hash: String,
    password_salt: String,
}

impl NewUser {
    /// Build a new user, normalizing username and email.
    ///
    /// # Errors
    /// * `EmptyUsername` / `EmptyEmail` - Blank after trimming
    /// * `UsernameTooLong` / `EmailTooLong` - Over the storage limits
    /// * `EmptyPasswordHash` / `EmptyPasswordSalt` - Missing hash material
    pub fn new(
        username: &str,
        email: &str,
        password_hash: String,
        password_salt: String,
    ) -> Result<Self, UserError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(UserError::EmptyUsername);
        }
        let username_length = username.chars().count();
        if username_length > MAX_USERNAME_LENGTH {
            return Err(UserError::UsernameTooLong {
                max: MAX_USERNAME_LENGTH,
                actual: username_length,
            });
        }

        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(UserError::EmptyEmail);
        }
        let email_length = email.chars().count();
        if email_length > MAX_EMAIL_LENGTH {
            return Err(UserError::EmailTooLong {
                max: MAX_EMAIL_LENGTH,
                actual: email_length,
            });
        }

        if password_hash.trim().is_empty() {
            return Err(UserError::EmptyPasswordHash);
        }
        if password_salt.trim().is_empty() {
            return Err(UserError::EmptyPasswordSalt);
        }

        Ok(Self {
            username: username.to_string(),
            email,
            password_hash,
            password_salt,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn password_salt(&self) -> &str {
        &self.password_salt
    }

    /// Attach the identity assigned by the store.
    pub fn into_user(self, id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            password_salt: self.password_salt,
            created_at,
        }
    }
}

/// Output of password hashing: base64 hash plus the salt used to derive it.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    pub hash: String,
    pub salt: String,
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword").finish_non_exhaustive()
    }
}

/// Raw registration input, untrimmed and untrusted.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterCommand {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for RegisterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCommand")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Raw login input.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Category of a rejected authentication request, ordered by severity of
/// the HTTP status it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Unauthorized,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Payload returned when registration or login succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSuccess {
    pub token: String,
    pub user_id: UserId,
    pub username: String,
}

/// Typed rejection with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthFailure {
    #[serde(skip)]
    pub kind: ErrorKind,
    pub message: String,
}

impl From<ValidationFailure> for AuthFailure {
    fn from(failure: ValidationFailure) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: failure.to_string(),
        }
    }
}

impl From<ConflictError> for AuthFailure {
    fn from(conflict: ConflictError) -> Self {
        Self {
            kind: ErrorKind::Conflict,
            message: conflict.to_string(),
        }
    }
}

impl From<InvalidCredentials> for AuthFailure {
    fn from(rejection: InvalidCredentials) -> Self {
        Self {
            kind: ErrorKind::Unauthorized,
            message: rejection.to_string(),
        }
    }
}

/// Result of a registration or login: exactly one of success or failure.
///
/// Serializes untagged, as `{token, userId, username}` or `{message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuthOutcome {
    Success(AuthSuccess),
    Failure(AuthFailure),
}

impl AuthOutcome {
    pub fn success(token: String, user: &User) -> Self {
        AuthOutcome::Success(AuthSuccess {
            token,
            user_id: user.id,
            username: user.username.clone(),
        })
    }

    pub fn failure(failure: impl Into<AuthFailure>) -> Self {
        AuthOutcome::Failure(failure.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success(_))
    }

    /// Failure category, `None` on success.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            AuthOutcome::Success(_) => None,
            AuthOutcome::Failure(failure) => Some(failure.kind),
        }
    }

    /// Transport status for the presentation layer.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthOutcome::Success(_) => StatusCode::OK,
            AuthOutcome::Failure(failure) => failure.kind.status_code(),
        }
    }
}
