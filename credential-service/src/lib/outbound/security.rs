//! Adapters from the `auth` utilities to the service's hashing and token ports.

use auth::Argon2PasswordHasher;
use auth::JwtIssuer;

use crate::credentials::errors::PasswordError;
use crate::credentials::errors::TokenError;
use crate::credentials::models::HashedPassword;
use crate::credentials::models::UserId;
use crate::credentials::ports::PasswordHasher;
use crate::credentials::ports::TokenIssuer;

impl From<auth::PasswordError> for PasswordError {
    fn from(err: auth::PasswordError) -> Self {
        match err {
            auth::PasswordError::InvalidEncoding(msg) => PasswordError::MalformedStoredHash(msg),
            auth::PasswordError::HashingFailed(msg)
            | auth::PasswordError::InvalidParameters(msg) => PasswordError::HashingFailed(msg),
        }
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<HashedPassword, PasswordError> {
        let salted = Argon2PasswordHasher::hash(self, password)?;

        Ok(HashedPassword {
            hash: salted.hash,
            salt: salted.salt,
        })
    }

    fn verify(
        &self,
        password: &str,
        stored_hash: &str,
        stored_salt: &str,
    ) -> Result<bool, PasswordError> {
        Ok(Argon2PasswordHasher::verify(
            self,
            password,
            stored_hash,
            stored_salt,
        )?)
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, user_id: UserId, username: &str) -> Result<String, TokenError> {
        JwtIssuer::issue(self, user_id, username).map_err(|e| TokenError::IssueFailed(e.to_string()))
    }
}
