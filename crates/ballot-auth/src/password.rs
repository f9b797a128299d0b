//! Password hashing and verification.
//!
//! Uses Argon2id (hybrid mode) with default parameters, OsRng salts and PHC
//! string output. Verification is constant-time via the `argon2` crate.
//!
//! # Example
//!
//! ```
//! use ballot_auth::password::{hash_password, verify_password};
//!
//! let hash = hash_password("Passw0rd!1").unwrap();
//! assert!(hash.starts_with("$argon2id$"));
//! assert!(verify_password("Passw0rd!1", &hash).unwrap());
//! assert!(!verify_password("wrong", &hash).unwrap());
//! ```

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hashes a password for storage.
///
/// # Errors
///
/// Returns `argon2::password_hash::Error` if hashing fails (rare).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC-formatted Argon2 hash.
///
/// Returns `Ok(true)` on a match, `Ok(false)` on a mismatch.
///
/// # Errors
///
/// Returns an error only if the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
