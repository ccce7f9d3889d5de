//! Authentication utilities library
//!
//! Provides the cryptographic building blocks of the credential service:
//! - Salted password hashing (Argon2id, hash and salt stored separately)
//! - Signed access token issuing and validation (HS256 JWT)
//!
//! Services define their own port traits and adapt these implementations,
//! so no domain types live here.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::Argon2PasswordHasher;
//!
//! let hasher = Argon2PasswordHasher::new();
//! let salted = hasher.hash("Password123").unwrap();
//! let is_valid = hasher.verify("Password123", &salted.hash, &salted.salt).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{JwtIssuer, JwtOptions};
//!
//! let issuer = JwtIssuer::new(&JwtOptions {
//!     key: "secret_key_at_least_32_bytes_long!".to_string(),
//!     issuer: "credential-service".to_string(),
//!     audience: "credential-clients".to_string(),
//!     access_token_lifetime_hours: 24,
//! })
//! .unwrap();
//!
//! let token = issuer.issue(1, "alice").unwrap();
//! let claims = issuer.decode(&token).unwrap();
//! assert_eq!(claims.name, "alice");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::JwtIssuer;
pub use jwt::JwtOptions;
pub use password::Argon2PasswordHasher;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::SaltedHash;
