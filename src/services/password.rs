//! PBKDF2 password hashing.
//!
//! Hashes are stored as `pbkdf2_sha256$<iterations>$<salt>$<hash>` with the
//! salt and hash base64 encoded, so the iteration count can be raised later
//! without invalidating existing accounts.

use std::num::NonZeroU32;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use thiserror::Error;

const SCHEME: &str = "pbkdf2_sha256";
const SALT_LEN: usize = 16;
const CREDENTIAL_LEN: usize = digest::SHA256_OUTPUT_LEN;
const ITERATIONS: NonZeroU32 = match NonZeroU32::new(100_000) {
    Some(value) => value,
    None => panic!("iteration count must be non-zero"),
};

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to generate password salt")]
    Salt,
}

/// Derive a salted hash of `password`.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| PasswordError::Salt)?;

    let mut credential = [0u8; CREDENTIAL_LEN];
    pbkdf2::derive(
        ALGORITHM,
        ITERATIONS,
        &salt,
        password.as_bytes(),
        &mut credential,
    );

    Ok(format!(
        "{SCHEME}${ITERATIONS}${}${}",
        STANDARD.encode(salt),
        STANDARD.encode(credential)
    ))
}

/// Check `password` against a hash produced by [`hash_password`].
///
/// Malformed hashes never verify.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.split('$');
    let (Some(scheme), Some(iterations), Some(salt), Some(credential), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }

    let Some(iterations) = iterations.parse::<u32>().ok().and_then(NonZeroU32::new) else {
        return false;
    };
    let (Ok(salt), Ok(credential)) = (STANDARD.decode(salt), STANDARD.decode(credential)) else {
        return false;
    };

    pbkdf2::verify(
        ALGORITHM,
        iterations,
        &salt,
        password.as_bytes(),
        &credential,
    )
    .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_only_the_original_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("pbkdf2_sha256$100000$"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("battery staple", &hash));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let first = hash_password("secret").unwrap();
        let second = hash_password("secret").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hashes_do_not_verify() {
        assert!(!verify_password("secret", ""));
        assert!(!verify_password("secret", "plain$1$AA==$AA=="));
        assert!(!verify_password("secret", "pbkdf2_sha256$0$AA==$AA=="));
        assert!(!verify_password("secret", "pbkdf2_sha256$10$not base64$AA=="));
    }
}
