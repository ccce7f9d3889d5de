use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::errors::JwtError;
use super::options::JwtOptions;

/// Issues and verifies signed access tokens.
///
/// Uses HS256 (HMAC with SHA-256). Issuer, audience and lifetime come from
/// [`JwtOptions`], which are validated once when the issuer is built.
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl JwtIssuer {
    /// Create a new issuer from validated options.
    ///
    /// # Arguments
    /// * `options` - Key material, issuer, audience and lifetime
    ///
    /// # Returns
    /// JwtIssuer instance configured with HS256 algorithm
    ///
    /// # Errors
    /// * Any `JwtOptions::validate` error (short key, blank issuer, lifetime out of range)
    pub fn new(options: &JwtOptions) -> Result<Self, JwtError> {
        let key = options.validate()?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&key),
            decoding_key: DecodingKey::from_secret(&key),
            algorithm: Algorithm::HS256,
            issuer: options.issuer.clone(),
            audience: options.audience.clone(),
            lifetime: Duration::hours(options.access_token_lifetime_hours),
        })
    }

    /// Configured token lifetime.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for a user, valid from now.
    ///
    /// # Arguments
    /// * `user_id` - Subject of the token
    /// * `username` - Value of the `name` claim
    ///
    /// # Returns
    /// Signed JWT string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, user_id: impl ToString, username: &str) -> Result<String, JwtError> {
        self.issue_at(user_id, username, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        user_id: impl ToString,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = AccessClaims::for_user(
            user_id,
            username,
            &self.issuer,
            &self.audience,
            issued_at,
            self.lifetime,
        );
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// Checks signature, expiry, issuer and audience.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `DecodingFailed` - Token is malformed, tampered with or meant for someone else
    pub fn decode(&self, token: &str) -> Result<AccessClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        let token_data =
            decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    _ => JwtError::DecodingFailed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
