//! Keyed registry of distribution stores, one per issuer.
//!
//! Owned by the ledger service; never a process-wide global.

use std::collections::HashMap;

use giftlock_types::{AccountId, GiftlockError, Result};

use crate::store::DistributionStore;

/// Persistence substrate for distribution stores, keyed by issuer.
#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: HashMap<AccountId, DistributionStore>,
}

impl StoreRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn exists(&self, issuer: &AccountId) -> bool {
        self.stores.contains_key(issuer)
    }

    #[must_use]
    pub fn get(&self, issuer: &AccountId) -> Option<&DistributionStore> {
        self.stores.get(issuer)
    }

    pub(crate) fn get_mut(&mut self, issuer: &AccountId) -> Option<&mut DistributionStore> {
        self.stores.get_mut(issuer)
    }

    /// Persist a new store. Never overwrites.
    ///
    /// # Errors
    /// `StoreAlreadyExists` if the issuer already has one.
    pub fn put(&mut self, store: DistributionStore) -> Result<()> {
        let issuer = store.issuer();
        if self.stores.contains_key(&issuer) {
            return Err(GiftlockError::StoreAlreadyExists(issuer));
        }
        self.stores.insert(issuer, store);
        Ok(())
    }

    /// Take a store out of the registry.
    pub fn remove(&mut self, issuer: &AccountId) -> Option<DistributionStore> {
        self.stores.remove(issuer)
    }

    /// Issuers with a store, sorted.
    #[must_use]
    pub fn issuers(&self) -> Vec<AccountId> {
        let mut ids: Vec<_> = self.stores.keys().copied().collect();
        ids.sort();
        ids
    }
}
