use std::env;
use std::fmt;

use auth::HashingParams;
use auth::JwtOptions;
use config::builder::DefaultState;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

// Development-only key: 32 bytes of 'a'
const DEFAULT_JWT_KEY: &str = "base64:YWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYWE=";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub jwt: JwtConfig,
    pub hashing: HashingConfig,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub key: String,
    pub issuer: String,
    pub audience: String,
    pub access_token_lifetime_hours: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
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

/// Argon2id cost parameters. Changing them invalidates stored hashes.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl From<&JwtConfig> for JwtOptions {
    fn from(config: &JwtConfig) -> Self {
        JwtOptions {
            key: config.key.clone(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_token_lifetime_hours: config.access_token_lifetime_hours,
        }
    }
}

impl From<HashingConfig> for HashingParams {
    fn from(config: HashingConfig) -> Self {
        HashingParams {
            memory_kib: config.memory_kib,
            iterations: config.iterations,
            parallelism: config.parallelism,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (CREDENTIALS_JWT__KEY, CREDENTIALS_HASHING__MEMORY_KIB, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: CREDENTIALS_JWT__ISSUER=... overrides jwt.issuer
            .add_source(
                Environment::with_prefix("CREDENTIALS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        configuration.try_deserialize()
    }

    /// Builder pre-populated with the built-in defaults.
    pub fn defaults() -> Result<config::builder::ConfigBuilder<DefaultState>, ConfigError> {
        let params = HashingParams::default();

        ConfigBuilder::builder()
            .set_default("jwt.key", DEFAULT_JWT_KEY)?
            .set_default("jwt.issuer", "credential-service")?
            .set_default("jwt.audience", "credential-service")?
            .set_default("jwt.access_token_lifetime_hours", 24_i64)?
            .set_default("hashing.memory_kib", i64::from(params.memory_kib))?
            .set_default("hashing.iterations", i64::from(params.iterations))?
            .set_default("hashing.parallelism", i64::from(params.parallelism))
    }
}
