// Credential hashing with Argon2id
// Decision: Argon2id with library defaults; a fresh random salt per hash

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a plaintext password for storage. The result embeds algorithm,
/// parameters, and salt, so no extra columns are needed.
pub fn hash_password(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("password hashing failed: {e}"))
}

/// Check a plaintext password against a stored hash. A mismatch is `false`,
/// not an error; only an unparseable hash is an error.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| anyhow!("stored password hash is malformed: {e}"))?;

    Ok(Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_accepts_correct_password_only() {
        let hash = hash_password("s3cret-pass").unwrap();

        assert!(verify_password("s3cret-pass", &hash).unwrap());
        assert!(!verify_password("s3cret-pass2", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn salts_make_hashes_unique() {
        let first = hash_password("repeated").unwrap();
        let second = hash_password("repeated").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("repeated", &first).unwrap());
        assert!(verify_password("repeated", &second).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error_not_a_match() {
        assert!(verify_password("whatever", "not-a-phc-string").is_err());
    }

    #[test]
    fn uses_argon2id_variant() {
        let hash = hash_password("x").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }
}
