//! Fund conservation check for a distribution store.
//!
//! ```text
//! ∀ issuer: balance(custody(issuer)) == Σ entry.amount
//! ```
//!
//! Every operation moves exactly the delta it applies to the entry map, so
//! this holds after each commit. A failure means funds reached or left the
//! custody account by some other path.

use giftlock_types::{GiftlockError, Result};

use crate::store::DistributionStore;

/// Verify that `custody_balance` matches the store's outstanding gifts.
///
/// # Errors
/// [`GiftlockError::SupplyInvariantViolation`] if they differ.
pub fn verify(store: &DistributionStore, custody_balance: u64) -> Result<()> {
    let owed = store.total_owed()?;
    if owed != custody_balance {
        tracing::error!(
            issuer = %store.issuer(),
            custody = %store.custody_account(),
            owed,
            custody_balance,
            "Custody balance diverged from gift entries"
        );
        return Err(GiftlockError::SupplyInvariantViolation {
            reason: format!(
                "issuer {}: custody holds {custody_balance}, entries owe {owed} ({} entries)",
                store.issuer(),
                store.len(),
            ),
        });
    }
    Ok(())
}
