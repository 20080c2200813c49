//! Configuration for a GiftLock ledger instance.

use serde::{Deserialize, Serialize};

use crate::{AssetId, GiftlockError, Result, constants};

/// Ledger-wide escrow configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscrowConfig {
    /// The single asset every custody account is registered to hold.
    pub asset: AssetId,
    /// Seed combined with the issuer identity to derive custody accounts.
    pub custody_seed: String,
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            asset: constants::DEFAULT_ASSET.to_string(),
            custody_seed: constants::DEFAULT_CUSTODY_SEED.to_string(),
        }
    }
}

impl EscrowConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json(doc: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(doc)
            .map_err(|e| GiftlockError::Configuration(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations that cannot derive or fund custody accounts.
    pub fn validate(&self) -> Result<()> {
        if self.asset.trim().is_empty() {
            return Err(GiftlockError::Configuration("asset must not be empty".into()));
        }
        if self.custody_seed.is_empty() {
            return Err(GiftlockError::Configuration(
                "custody_seed must not be empty".into(),
            ));
        }
        Ok(())
    }
}
