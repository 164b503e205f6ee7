//! Argon2 password hashing shared by the identity store adapters.
//!
//! Hashing runs on the blocking pool so request workers stay responsive.
//! Logins for unknown usernames are checked against a fixed dummy digest so
//! they cost the same Argon2 work as a wrong password.

use std::sync::LazyLock;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;
use tracing::error;
use zeroize::Zeroizing;

const SALT_LEN: usize = 16;
const DUMMY_PASSWORD: &str = "campgrounds-unknown-account";
const DUMMY_SALT: [u8; SALT_LEN] = [0x5a; SALT_LEN];

/// Digest standing in for accounts that do not exist.
static DUMMY_DIGEST: LazyLock<Option<PasswordDigest>> = LazyLock::new(|| {
    let digest = SaltString::encode_b64(&DUMMY_SALT).and_then(|salt| {
        Argon2::default()
            .hash_password(DUMMY_PASSWORD.as_bytes(), &salt)
            .map(|hash| PasswordDigest(hash.to_string()))
    });
    match digest {
        Ok(digest) => Some(digest),
        Err(err) => {
            error!(error = %err, "failed to build the dummy password digest");
            None
        }
    }
});

/// Failure while producing a password hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("password hashing failed: {message}")]
pub struct HashingError {
    message: String,
}

impl HashingError {
    fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Argon2 PHC string for a stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a PHC string read back from storage.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check a plaintext password against this digest.
    ///
    /// A digest that fails to parse never matches.
    pub fn matches(&self, password: &str) -> bool {
        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }
}

fn hash_blocking(password: &str) -> Result<PasswordDigest, HashingError> {
    let mut salt_bytes = [0_u8; SALT_LEN];
    getrandom::getrandom(&mut salt_bytes).map_err(HashingError::new)?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(HashingError::new)?;
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(HashingError::new)?
        .to_string();
    Ok(PasswordDigest(phc))
}

/// Hash a password with a fresh random salt.
pub async fn hash_password(password: &str) -> Result<PasswordDigest, HashingError> {
    let owned = Zeroizing::new(password.to_owned());
    tokio::task::spawn_blocking(move || hash_blocking(&owned))
        .await
        .map_err(HashingError::new)?
}

/// Verify a password against a stored digest.
///
/// `None` means no account matched. The password is then checked against the
/// dummy digest and the result discarded, so the caller always pays for one
/// Argon2 verification.
pub async fn verify_password(digest: Option<PasswordDigest>, password: &str) -> bool {
    let known = digest.is_some();
    let Some(digest) = digest.or_else(|| DUMMY_DIGEST.clone()) else {
        return false;
    };
    let owned = Zeroizing::new(password.to_owned());
    match tokio::task::spawn_blocking(move || digest.matches(&owned)).await {
        Ok(matched) => known && matched,
        Err(err) => {
            error!(error = %err, "password verification task failed");
            false
        }
    }
}
