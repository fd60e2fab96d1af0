//! Shared-secret gate in front of every write operation.

use log::warn;

use crate::error::{ContentError, Result};

pub const HASH_ENV: &str = "HASHED_PSW";

/// Proof that a credential passed the gate. Mutating repository calls demand
/// one, so the credential check always runs before any other write logic.
#[derive(Debug)]
pub struct Authorized {
    _private: (),
}

/// Verifies submitted plaintext against a single bcrypt hash.
///
/// A gate built without a hash is locked: it accepts nothing.
#[derive(Debug, Clone)]
pub struct AccessGate {
    hash: Option<String>,
}

impl AccessGate {
    pub fn new(raw_hash: &str) -> Self {
        Self {
            hash: Some(strip_byte_literal(raw_hash.trim()).to_string()),
        }
    }

    pub fn locked() -> Self {
        Self { hash: None }
    }

    /// Reads [`HASH_ENV`] once. Call at startup and inject the result.
    pub fn from_env() -> Self {
        match std::env::var(HASH_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::new(&raw),
            _ => {
                warn!("{HASH_ENV} is not set; every write request will be rejected");
                Self::locked()
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.hash.is_some()
    }

    /// An absent or empty candidate is [`ContentError::CredentialMissing`];
    /// anything that fails verification is [`ContentError::CredentialWrong`].
    pub fn verify(&self, candidate: Option<&str>) -> Result<Authorized> {
        let candidate = candidate
            .filter(|c| !c.is_empty())
            .ok_or(ContentError::CredentialMissing)?;

        let Some(hash) = &self.hash else {
            warn!("write attempt while no credential hash is configured");
            return Err(ContentError::CredentialWrong);
        };

        match bcrypt::verify(candidate, hash) {
            Ok(true) => Ok(Authorized { _private: () }),
            Ok(false) => {
                warn!("rejected write request: wrong key");
                Err(ContentError::CredentialWrong)
            }
            Err(e) => {
                warn!("stored credential hash is unusable: {e}");
                Err(ContentError::CredentialWrong)
            }
        }
    }
}

/// `b"..."` / `b'...'` as printed by a byte-string repr, pasted into the env.
fn strip_byte_literal(raw: &str) -> &str {
    raw.strip_prefix("b\"")
        .and_then(|r| r.strip_suffix('"'))
        .or_else(|| raw.strip_prefix("b'").and_then(|r| r.strip_suffix('\'')))
        .unwrap_or(raw)
}
