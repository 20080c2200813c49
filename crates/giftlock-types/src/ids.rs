//! Identifiers used throughout GiftLock.
//!
//! Every participant (issuer, recipient, custody sub-account) is addressed
//! by a 32-byte [`AccountId`]. For human-held accounts this is the raw
//! ed25519 public key; custody sub-accounts use a SHA-256 derivation.

use std::fmt;

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Identity of an account that can hold balances: an issuer, a recipient,
/// or a derived custody sub-account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// Account addressed by an ed25519 public key.
    #[must_use]
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        Self(key.to_bytes())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0[..8]))
    }
}

/// Random identity for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl AccountId {
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random::<[u8; 32]>())
    }
}

/// Type alias for asset identifiers (e.g., "APT", "USDC").
pub type AssetId = String;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
