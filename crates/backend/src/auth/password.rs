//! bcrypt password hashing.

use bcrypt::BcryptError;

/// Work factor used when hashing new passwords
pub const BCRYPT_COST: u32 = 10;

/// Hash a password with a fresh salt. Returns a `$2b$10$...` string.
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    bcrypt::hash(password, BCRYPT_COST)
}

/// Compare a password with a stored hash. `Err` means the stored hash is
/// malformed, not that the password is wrong.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("password1").expect("should hash");
        assert!(hash.starts_with("$2b$10$"));
        assert!(verify_password("password1", &hash).unwrap());
        assert!(!verify_password("password2", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("password1").unwrap();
        let b = hash_password("password1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("password1", "not-a-hash").is_err());
    }
}
