use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;

use super::errors::PasswordError;

type HmacSha512 = Hmac<Sha512>;

const SALT_LENGTH: usize = 16;
const HASH_LENGTH: usize = 64;
const ITERATIONS: u32 = 100_000;

/// Salted password digest produced by [`PasswordHasher::hash`].
///
/// Both fields are base64; the salt must be stored alongside the hash
/// so the digest can be recomputed at verification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    pub hash: String,
    pub salt: String,
}

/// Password hashing implementation.
///
/// Derives digests with PBKDF2-HMAC-SHA512 (100 000 iterations, 64-byte
/// output) over a fresh 16-byte random salt per call. A single fast hash
/// is deliberately not enough here.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// Two calls with the same password yield different digests because
    /// the salt is drawn from the OS RNG each time. The empty string is
    /// an acceptable password at this layer; policy rejection happens in
    /// the service layer before hashing.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Base64 hash and salt pair
    pub fn hash(&self, password: &str) -> PasswordDigest {
        let mut salt = [0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut salt);

        let mut derived = [0u8; HASH_LENGTH];
        pbkdf2::<HmacSha512>(password.as_bytes(), &salt, ITERATIONS, &mut derived);

        PasswordDigest {
            hash: BASE64.encode(derived),
            salt: BASE64.encode(salt),
        }
    }

    /// Verify a password against a stored hash and salt.
    ///
    /// Recomputes the digest with the stored salt, using the stored hash
    /// length as the output length, and compares in constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored base64 hash
    /// * `salt` - Stored base64 salt
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidHash` - Stored hash is not decodable
    /// * `InvalidSalt` - Stored salt is not decodable
    pub fn verify(&self, password: &str, hash: &str, salt: &str) -> Result<bool, PasswordError> {
        let stored_hash = BASE64
            .decode(hash)
            .map_err(|e| PasswordError::InvalidHash(e.to_string()))?;
        let salt_bytes = BASE64
            .decode(salt)
            .map_err(|e| PasswordError::InvalidSalt(e.to_string()))?;

        let mut computed = vec![0u8; stored_hash.len()];
        pbkdf2::<HmacSha512>(password.as_bytes(), &salt_bytes, ITERATIONS, &mut computed);

        Ok(fixed_time_eq(&computed, &stored_hash))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two byte slices without an early exit on the first mismatch.
fn fixed_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let digest = hasher.hash(password);

        assert!(hasher
            .verify(password, &digest.hash, &digest.salt)
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &digest.hash, &digest.salt)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_same_password_different_digests() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("repeated_password");
        let second = hasher.hash("repeated_password");

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.hash, second.hash);
    }

    #[test]
    fn test_empty_password_round_trips() {
        let hasher = PasswordHasher::new();

        let digest = hasher.hash("");

        assert!(hasher
            .verify("", &digest.hash, &digest.salt)
            .expect("Failed to verify empty password"));
        assert!(!hasher
            .verify("not_empty", &digest.hash, &digest.salt)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_digest_lengths() {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash("password");

        assert_eq!(BASE64.decode(&digest.hash).unwrap().len(), HASH_LENGTH);
        assert_eq!(BASE64.decode(&digest.salt).unwrap().len(), SALT_LENGTH);
    }

    #[test]
    fn test_verify_invalid_stored_hash() {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash("password");

        let result = hasher.verify("password", "not-base64!!", &digest.salt);
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));

        let result = hasher.verify("password", &digest.hash, "not-base64!!");
        assert!(matches!(result, Err(PasswordError::InvalidSalt(_))));
    }

    #[test]
    fn test_fixed_time_eq() {
        assert!(fixed_time_eq(b"abc", b"abc"));
        assert!(!fixed_time_eq(b"abc", b"abd"));
        assert!(!fixed_time_eq(b"abc", b"abcd"));
        assert!(fixed_time_eq(b"", b""));
    }
}
