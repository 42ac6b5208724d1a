//! Shared-secret verification.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The password attempt did not match the shared secret.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No valid session accompanied the request.
    #[error("missing or unknown session token")]
    Unauthorized,
}

/// The deployment's single shared secret.
///
/// Compared in constant time; the byte value is never logged or exposed
/// through `Debug`.
#[derive(Clone)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    /// Verify a password attempt.
    ///
    /// Constant-time: every byte is examined regardless of where the first
    /// mismatch sits, so response timing reveals nothing about a matching
    /// prefix. Length is folded into the accumulator instead of returning
    /// early.
    pub fn verify(&self, attempt: &[u8]) -> Result<(), AccessError> {
        let mut diff = self.0.len() ^ attempt.len();
        for i in 0..self.0.len().max(attempt.len()) {
            let a = self.0.get(i).copied().unwrap_or(0);
            let b = attempt.get(i).copied().unwrap_or(0);
            diff |= usize::from(a ^ b);
        }
        if diff == 0 {
            Ok(())
        } else {
            Err(AccessError::InvalidCredentials)
        }
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}
