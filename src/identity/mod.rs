//! Caller identity tokens and cookie signing.
//!
//! Identity here is advisory: a token marks a browser, not a person,
//! and owning one only decides whether an edit form is offered. The
//! transport layer stores tokens client-side for a fixed retention
//! window and presents them on every request; this module mints fresh
//! tokens and signs/verifies cookie values so tampered ones can be
//! rejected before they reach the ownership check.
//!
//! All hashing is keyed blake3; the key is derived from the configured
//! secret, so two deployments with different secrets produce disjoint
//! token and signature spaces.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::config::IdentityConfig;

/// Key-derivation context, fixed for the lifetime of the format.
const KEY_CONTEXT: &str = "samizdat 2024-06-01 identity token";

/// An opaque caller identity.
///
/// Compared by exact string equality, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityToken(String);

impl IdentityToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for IdentityToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for IdentityToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mints identity tokens and signs cookie values.
#[derive(Debug)]
pub struct TokenMint {
    key: [u8; 32],
    digest_size: usize,
    retention_secs: u64,
    sequence: AtomicU64,
}

impl TokenMint {
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            key: blake3::derive_key(KEY_CONTEXT, config.secret_key.as_bytes()),
            // Digest sizes beyond the blake3 output add nothing
            digest_size: config.digest_size.clamp(1, 32),
            retention_secs: config.retention_secs,
            sequence: AtomicU64::new(0),
        }
    }

    /// Mint a fresh token for a caller seen for the first time.
    ///
    /// Tokens need to be unique, not unpredictable (they are not
    /// credentials); a keyed digest over the clock and a process-local
    /// sequence number is enough.
    pub fn issue(&self) -> IdentityToken {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);

        let mut hasher = blake3::Hasher::new_keyed(&self.key);
        hasher.update(&nanos.to_le_bytes());
        hasher.update(&seq.to_le_bytes());
        let digest = hasher.finalize();
        IdentityToken(hex::encode(&digest.as_bytes()[..self.digest_size]))
    }

    /// Keyed MAC over a cookie value, hex-encoded.
    pub fn sign(&self, value: &str) -> String {
        let mut hasher = blake3::Hasher::new_keyed(&self.key);
        hasher.update(value.as_bytes());
        let digest = hasher.finalize();
        hex::encode(&digest.as_bytes()[..self.digest_size])
    }

    /// Check a presented signature against the genuine MAC.
    ///
    /// Empty signatures always fail. Comparison does not short-circuit
    /// on the first mismatching byte.
    pub fn verify(&self, value: &str, sig: &str) -> bool {
        let good = self.sign(value);
        if sig.is_empty() || sig.len() != good.len() {
            return false;
        }
        sig.bytes()
            .zip(good.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }

    /// How long the transport layer should retain tokens client-side,
    /// in seconds. Not interpreted by this crate.
    pub fn retention_secs(&self) -> u64 {
        self.retention_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mint() -> TokenMint {
        TokenMint::new(&IdentityConfig::default())
    }

    #[test]
    fn test_issue_unique() {
        let mint = mint();
        let a = mint.issue();
        let b = mint.issue();
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_length_matches_digest_size() {
        let mint = mint();
        // hex doubles the byte count
        assert_eq!(
            mint.issue().as_str().len(),
            IdentityConfig::default().digest_size * 2
        );
    }

    #[test]
    fn test_sign_verify() {
        let mint = mint();
        let sig = mint.sign("privet-mir_1");
        assert!(mint.verify("privet-mir_1", &sig));
    }

    #[test]
    fn test_verify_rejects_tampered() {
        let mint = mint();
        let sig = mint.sign("privet-mir_1");
        assert!(!mint.verify("privet-mir_2", &sig));
        assert!(!mint.verify("privet-mir_1", "deadbeef"));
        assert!(!mint.verify("privet-mir_1", ""));
    }

    #[test]
    fn test_different_secrets_disjoint() {
        let a = TokenMint::new(&IdentityConfig {
            secret_key: "one".to_string(),
            ..IdentityConfig::default()
        });
        let b = TokenMint::new(&IdentityConfig {
            secret_key: "two".to_string(),
            ..IdentityConfig::default()
        });
        let sig = a.sign("slug_1");
        assert!(!b.verify("slug_1", &sig));
    }

    #[test]
    fn test_digest_size_clamped() {
        let mint = TokenMint::new(&IdentityConfig {
            digest_size: 4096,
            ..IdentityConfig::default()
        });
        assert_eq!(mint.issue().as_str().len(), 64);
    }
}
