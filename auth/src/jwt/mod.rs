pub mod claims;
pub mod errors;
pub mod issuer;
pub mod options;

pub use claims::AccessClaims;
pub use errors::JwtError;
pub use issuer::JwtIssuer;
pub use options::decode_key;
pub use options::JwtOptions;
