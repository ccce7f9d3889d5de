pub mod argon2;
pub mod errors;

pub use argon2::Argon2PasswordHasher;
pub use argon2::HashingParams;
pub use argon2::SaltedHash;
pub use errors::PasswordError;
