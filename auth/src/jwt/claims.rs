use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by an access token.
///
/// Standard RFC 7519 claims plus `name` holding the username and `nameid`
/// repeating the user id for consumers that read identity from that claim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Username
    pub name: String,

    /// User identifier, same value as `sub`
    pub nameid: String,

    /// JWT ID, unique per issued token
    pub jti: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl AccessClaims {
    /// Build claims for a user, valid from `issued_at` for `lifetime`.
    ///
    /// A fresh random `jti` is generated on every call.
    pub fn for_user(
        user_id: impl ToString,
        username: impl ToString,
        issuer: impl ToString,
        audience: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let expiration = issued_at + lifetime;
        let user_id = user_id.to_string();

        Self {
            nameid: user_id.clone(),
            sub: user_id,
            name: username.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
        }
    }
}
