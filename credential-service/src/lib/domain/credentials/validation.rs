//! Shape and strength rules for registration and login input.
//!
//! Checks run in a fixed order and the first failing rule decides the
//! message: username, then email, then password.

use regex::Regex;

use crate::credentials::errors::ValidationFailure;
use crate::credentials::models::MAX_EMAIL_LENGTH;
use crate::credentials::models::MAX_USERNAME_LENGTH;

/// Minimum username length in characters.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in characters.
pub const MAX_PASSWORD_LENGTH: usize = 512;

const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_]+$";

// local@domain.tld, exactly one dot after the @
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@.]+\.[^\s@.]+$";

// Unicode general categories Lu, Ll and Nd
const UPPERCASE_PATTERN: &str = r"\p{Lu}";
const LOWERCASE_PATTERN: &str = r"\p{Ll}";
const DIGIT_PATTERN: &str = r"\p{Nd}";

/// Stateless validator holding its compiled patterns.
#[derive(Debug, Clone)]
pub struct CredentialValidator {
    username_pattern: Regex,
    email_pattern: Regex,
    uppercase_pattern: Regex,
    lowercase_pattern: Regex,
    digit_pattern: Regex,
}

impl CredentialValidator {
    pub fn new() -> Self {
        Self {
            username_pattern: compile(USERNAME_PATTERN),
            email_pattern: compile(EMAIL_PATTERN),
            uppercase_pattern: compile(UPPERCASE_PATTERN),
            lowercase_pattern: compile(LOWERCASE_PATTERN),
            digit_pattern: compile(DIGIT_PATTERN),
        }
    }

    /// Validate registration input.
    ///
    /// # Errors
    /// The first `ValidationFailure` found, checking username, email and
    /// password in that order.
    pub fn validate_registration(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ValidationFailure> {
        self.validate_username(username)?;
        self.validate_email(email)?;
        self.validate_password(password)
    }

    /// Validate login input. Only presence is checked.
    pub fn validate_login(&self, username: &str, password: &str) -> Result<(), ValidationFailure> {
        if username.trim().is_empty() {
            return Err(ValidationFailure::UsernameRequired);
        }
        if password.trim().is_empty() {
            return Err(ValidationFailure::PasswordRequired);
        }
        Ok(())
    }

    fn validate_username(&self, username: &str) -> Result<(), ValidationFailure> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationFailure::UsernameRequired);
        }

        let length = username.chars().count();
        if length < MIN_USERNAME_LENGTH {
            Err(ValidationFailure::UsernameTooShort)
        } else if length > MAX_USERNAME_LENGTH {
            Err(ValidationFailure::UsernameTooLong)
        } else if !self.username_pattern.is_match(username) {
            Err(ValidationFailure::UsernameInvalidCharacters)
        } else {
            Ok(())
        }
    }

    fn validate_email(&self, email: &str) -> Result<(), ValidationFailure> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationFailure::EmailRequired);
        }

        if email.chars().count() > MAX_EMAIL_LENGTH {
            Err(ValidationFailure::EmailTooLong)
        } else if email.contains("..") || !self.email_pattern.is_match(email) {
            Err(ValidationFailure::EmailInvalid)
        } else {
            Ok(())
        }
    }

    fn validate_password(&self, password: &str) -> Result<(), ValidationFailure> {
        if password.trim().is_empty() {
            return Err(ValidationFailure::PasswordRequired);
        }

        let length = password.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            Err(ValidationFailure::PasswordTooShort)
        } else if length > MAX_PASSWORD_LENGTH {
            Err(ValidationFailure::PasswordTooLong)
        } else if !self.has_required_character_classes(password) {
            Err(ValidationFailure::PasswordTooWeak)
        } else {
            Ok(())
        }
    }

    fn has_required_character_classes(&self, password: &str) -> bool {
        self.uppercase_pattern.is_match(password)
            && self.lowercase_pattern.is_match(password)
            && self.digit_pattern.is_match(password)
    }
}

impl Default for CredentialValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern)
        .unwrap_or_else(|error| panic!("validation pattern {pattern} failed to compile: {error}"))
}
