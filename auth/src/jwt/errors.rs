use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Signing key must be provided")]
    MissingKey,

    #[error("Signing key is not valid base64: {0}")]
    InvalidKeyEncoding(String),

    #[error("Signing key must be at least {min} bytes after decoding, got {actual}")]
    KeyTooShort { min: usize, actual: usize },

    #[error("Issuer must be provided")]
    MissingIssuer,

    #[error("Audience must be provided")]
    MissingAudience,

    #[error("Access token lifetime must be between {min} and {max} hours, got {actual}")]
    InvalidLifetime { min: i64, max: i64, actual: i64 },

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,
}
