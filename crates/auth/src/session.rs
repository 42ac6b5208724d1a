//! Authorized-session tracking.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::secret::{AccessError, SharedSecret};

/// Opaque token handed out after a successful password check.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl core::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SessionToken {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s)
            .map(Self)
            .map_err(|_| AccessError::Unauthorized)
    }
}

/// In-memory store of sessions that passed the gate.
///
/// Sessions live for the process lifetime with no expiry, mirroring the
/// per-session authorized flag this replaces.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<HashSet<SessionToken>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify a password attempt against the shared secret; on success mark
    /// a fresh session authorized and return its token.
    pub fn login(
        &self,
        secret: &SharedSecret,
        attempt: &[u8],
    ) -> Result<SessionToken, AccessError> {
        secret.verify(attempt)?;
        let token = SessionToken::new();
        self.inner.write().unwrap().insert(token);
        Ok(token)
    }

    /// Check whether a token belongs to an authorized session.
    pub fn authorize(&self, token: SessionToken) -> Result<(), AccessError> {
        if self.inner.read().unwrap().contains(&token) {
            Ok(())
        } else {
            Err(AccessError::Unauthorized)
        }
    }
}
