use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;

/// Number of random salt bytes generated per password.
pub const SALT_LENGTH: usize = 32;

/// Length of the derived hash in bytes.
pub const HASH_LENGTH: usize = 32;

/// Hash and salt of a password, both encoded as standard base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltedHash {
    pub hash: String,
    pub salt: String,
}

/// Argon2id cost parameters.
///
/// These are part of the stored format: hashes produced with one set of
/// parameters only verify with the same set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Salted password hashing implementation.
///
/// Derives a fixed-length Argon2id hash from the password and a random salt,
/// keeping hash and salt as two separate base64 strings.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Create a hasher with the default Argon2id parameters.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a hasher with explicit cost parameters.
    ///
    /// # Errors
    /// * `InvalidParameters` - Argon2 rejected the parameter combination
    pub fn with_params(params: HashingParams) -> Result<Self, PasswordError> {
        let params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            Some(HASH_LENGTH),
        )
        .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self { params })
    }

    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// Empty passwords are hashed like any other input.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Base64 encoded hash and salt
    ///
    /// # Errors
    /// * `HashingFailed` - Salt generation or key derivation failed
    pub fn hash(&self, password: &str) -> Result<SaltedHash, PasswordError> {
        let mut salt = [0u8; SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::HashingFailed(format!("Salt generation failed: {}", e)))?;

        let digest = self.derive(password, &salt)?;

        Ok(SaltedHash {
            hash: STANDARD.encode(digest),
            salt: STANDARD.encode(salt),
        })
    }

    /// Verify a password against a stored hash and salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Base64 encoded hash
    /// * `stored_salt` - Base64 encoded salt
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidEncoding` - Stored hash or salt is missing or not valid base64
    /// * `HashingFailed` - Key derivation rejected the stored salt
    pub fn verify(
        &self,
        password: &str,
        stored_hash: &str,
        stored_salt: &str,
    ) -> Result<bool, PasswordError> {
        if stored_hash.is_empty() || stored_salt.is_empty() {
            return Err(PasswordError::InvalidEncoding(
                "stored hash and salt must be provided".to_string(),
            ));
        }

        let expected = STANDARD
            .decode(stored_hash)
            .map_err(|e| PasswordError::InvalidEncoding(format!("password hash: {}", e)))?;
        let salt = STANDARD
            .decode(stored_salt)
            .map_err(|e| PasswordError::InvalidEncoding(format!("password salt: {}", e)))?;

        let computed = self.derive(password, &salt)?;

        Ok(computed.as_slice().ct_eq(expected.as_slice()).into())
    }

    fn derive(&self, password: &str, salt: &[u8]) -> Result<[u8; HASH_LENGTH], PasswordError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        let mut output = [0u8; HASH_LENGTH];
        argon2
            .hash_password_into(password.as_bytes(), salt, &mut output)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(output)
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
