pub mod claims;
pub mod config;
pub mod errors;
pub mod issuer;

pub use claims::SessionClaims;
pub use config::TokenConfig;
pub use errors::TokenConfigError;
pub use errors::TokenError;
pub use issuer::TokenIssuer;
