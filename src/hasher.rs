//! Credential Hashing
//!
//! Stored credentials are the lowercase-hex PBKDF2-HMAC-SHA512 derivation of
//! the plaintext password, keyed by the configured secret. The derivation is
//! deterministic so the store can match credentials by equality.
//!
//! When no secret is configured the hasher passes plaintext through
//! unchanged. This is a documented degraded mode, reported at startup, not
//! an accident.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

/// PBKDF2 iteration count.
const PBKDF2_ITERATIONS: u32 = 10_000;

/// Derived key length in bytes (128 hex characters once encoded).
const DERIVED_KEY_LEN: usize = 64;

/// Derives the stored representation of a plaintext password.
#[derive(Clone)]
pub struct CredentialHasher {
    secret: String,
}

impl CredentialHasher {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Whether hashing is disabled (empty secret, plaintext pass-through).
    pub fn is_passthrough(&self) -> bool {
        self.secret.is_empty()
    }

    /// Hash a plaintext password.
    ///
    /// Pure function of the plaintext and the configured secret: identical
    /// inputs always produce identical output. Returns the plaintext
    /// unchanged when no secret is configured.
    pub fn hash(&self, plaintext: &str) -> String {
        if self.secret.is_empty() {
            return plaintext.to_string();
        }

        let mut derived = [0u8; DERIVED_KEY_LEN];
        pbkdf2_hmac::<Sha512>(
            plaintext.as_bytes(),
            self.secret.as_bytes(),
            PBKDF2_ITERATIONS,
            &mut derived,
        );
        hex::encode(derived)
    }
}

impl fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
