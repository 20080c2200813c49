//! Validation guards shared by every ledger operation.
//!
//! Pure checks: none of these touch balances or stores. Each operation
//! runs the subset its contract needs before mutating anything.

use giftlock_custody::AssetLedger;
use giftlock_types::{AccountId, GiftEntry, GiftlockError, Result};

use crate::registry::StoreRegistry;
use crate::store::DistributionStore;

/// The issuer's store, or `StoreNotFound`.
pub fn store_exists(stores: &StoreRegistry, issuer: AccountId) -> Result<&DistributionStore> {
    stores
        .get(&issuer)
        .ok_or(GiftlockError::StoreNotFound(issuer))
}

/// `StoreAlreadyExists` if the issuer already has a store.
pub fn store_absent(stores: &StoreRegistry, issuer: AccountId) -> Result<()> {
    if stores.exists(&issuer) {
        return Err(GiftlockError::StoreAlreadyExists(issuer));
    }
    Ok(())
}

/// `LengthMismatch` unless all three sequences are the same length.
pub fn lengths_equal(addresses: &[AccountId], amounts: &[u64], unlock_times: &[u64]) -> Result<()> {
    if addresses.len() != amounts.len() || amounts.len() != unlock_times.len() {
        return Err(GiftlockError::LengthMismatch {
            addresses: addresses.len(),
            amounts: amounts.len(),
            unlock_times: unlock_times.len(),
        });
    }
    Ok(())
}

/// `CustodyRecipient` if `recipient` is the issuer's custody account or
/// any other capability-gated sub-account.
pub fn recipient_not_custody(
    assets: &AssetLedger,
    custody: AccountId,
    recipient: AccountId,
) -> Result<()> {
    if recipient == custody || assets.is_sub_account(recipient) {
        return Err(GiftlockError::CustodyRecipient(recipient));
    }
    Ok(())
}

/// The recipient's entry, or `EntryNotFound`.
pub fn entry_exists(store: &DistributionStore, recipient: AccountId) -> Result<GiftEntry> {
    store
        .entry(&recipient)
        .copied()
        .ok_or(GiftlockError::EntryNotFound {
            issuer: store.issuer(),
            recipient,
        })
}

/// The recipient's entry if claimable at `now`.
///
/// # Errors
/// `EntryNotFound` if absent, `TimeLockActive` if `now < unlock_time`.
pub fn unlock_reached(store: &DistributionStore, recipient: AccountId, now: u64) -> Result<GiftEntry> {
    let entry = entry_exists(store, recipient)?;
    if !entry.is_unlocked(now) {
        return Err(GiftlockError::TimeLockActive {
            unlock_time: entry.unlock_time,
            now,
        });
    }
    Ok(entry)
}
