pub mod errors;
pub mod pbkdf2;

pub use errors::PasswordError;
pub use pbkdf2::PasswordDigest;
pub use pbkdf2::PasswordHasher;
