//! Deterministic sub-account derivation and the custody capability.
//!
//! A sub-account's identity is `SHA-256(domain || owner || seed)`, so it is
//! unique and reproducible per `(owner, seed)`. Anyone can compute the
//! address; only the holder of the matching [`CustodyCapability`] can move
//! funds out of it.

use giftlock_types::{AccountId, constants};
use sha2::{Digest, Sha256};

/// Compute the sub-account address for `(owner, seed)`.
#[must_use]
pub fn derive_address(owner: AccountId, seed: &[u8]) -> AccountId {
    let mut hasher = Sha256::new();
    hasher.update(constants::SUB_ACCOUNT_DOMAIN);
    hasher.update(owner.as_bytes());
    hasher.update((seed.len() as u64).to_le_bytes());
    hasher.update(seed);
    AccountId(hasher.finalize().into())
}

/// Authorization to debit one custody sub-account.
///
/// Minted exactly once per sub-account by
/// [`AssetLedger::derive_sub_account`](crate::AssetLedger::derive_sub_account).
/// Not `Clone`, not `Copy`, not serializable, and its constructor is private
/// to this crate, so it cannot be duplicated or rebuilt from public data.
#[derive(Debug)]
pub struct CustodyCapability {
    account: AccountId,
}

impl CustodyCapability {
    pub(crate) fn mint(account: AccountId) -> Self {
        Self { account }
    }

    /// The sub-account this capability controls.
    #[must_use]
    pub fn account(&self) -> AccountId {
        self.account
    }
}
