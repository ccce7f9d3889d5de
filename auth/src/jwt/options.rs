use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use super::errors::JwtError;

/// Marker for signing keys supplied as base64 text.
pub const BASE64_KEY_PREFIX: &str = "base64:";

/// Minimum effective key length for HS256.
pub const MIN_KEY_LENGTH: usize = 32;

pub const MIN_LIFETIME_HOURS: i64 = 1;
pub const MAX_LIFETIME_HOURS: i64 = 168;

/// Settings controlling how access tokens are signed and bounded.
#[derive(Clone, Deserialize)]
pub struct JwtOptions {
    /// Raw key text, or base64 text prefixed with `base64:`
    pub key: String,
    pub issuer: String,
    pub audience: String,
    pub access_token_lifetime_hours: i64,
}

impl JwtOptions {
    /// Check every field and return the effective signing key.
    ///
    /// # Returns
    /// Decoded key bytes
    ///
    /// # Errors
    /// * `MissingKey` - Key is blank
    /// * `InvalidKeyEncoding` - `base64:` key does not decode
    /// * `KeyTooShort` - Decoded key is shorter than 32 bytes
    /// * `MissingIssuer` / `MissingAudience` - Blank issuer or audience
    /// * `InvalidLifetime` - Lifetime outside 1..=168 hours
    pub fn validate(&self) -> Result<Vec<u8>, JwtError> {
        if self.key.trim().is_empty() {
            return Err(JwtError::MissingKey);
        }

        let key = decode_key(&self.key)?;
        if key.len() < MIN_KEY_LENGTH {
            return Err(JwtError::KeyTooShort {
                min: MIN_KEY_LENGTH,
                actual: key.len(),
            });
        }

        if self.issuer.trim().is_empty() {
            return Err(JwtError::MissingIssuer);
        }
        if self.audience.trim().is_empty() {
            return Err(JwtError::MissingAudience);
        }

        if !(MIN_LIFETIME_HOURS..=MAX_LIFETIME_HOURS).contains(&self.access_token_lifetime_hours) {
            return Err(JwtError::InvalidLifetime {
                min: MIN_LIFETIME_HOURS,
                max: MAX_LIFETIME_HOURS,
                actual: self.access_token_lifetime_hours,
            });
        }

        Ok(key)
    }
}

// The key never shows up in logs.
impl fmt::Debug for JwtOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtOptions")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field(
                "access_token_lifetime_hours",
                &self.access_token_lifetime_hours,
            )
            .finish()
    }
}

/// Turn configured key text into key bytes.
///
/// Text starting with `base64:` is decoded with the standard alphabet,
/// anything else is taken as its UTF-8 bytes.
pub fn decode_key(key: &str) -> Result<Vec<u8>, JwtError> {
    match key.strip_prefix(BASE64_KEY_PREFIX) {
        Some(encoded) => STANDARD
            .decode(encoded)
            .map_err(|e| JwtError::InvalidKeyEncoding(e.to_string())),
        None => Ok(key.as_bytes().to_vec()),
    }
}
