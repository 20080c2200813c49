//! The per-issuer distribution store.
//!
//! A [`DistributionStore`] owns the recipient → [`GiftEntry`] map and the
//! [`CustodyCapability`] for the issuer's custody sub-account. The
//! capability is a private field: code outside this crate can read entries
//! but has no path to the token that moves escrowed funds.

use std::collections::HashMap;

use giftlock_custody::CustodyCapability;
use giftlock_types::{AccountId, GiftEntry, GiftlockError, Result};

/// One issuer's escrow: gift entries plus exclusive custody authority.
#[derive(Debug)]
pub struct DistributionStore {
    issuer: AccountId,
    entries: HashMap<AccountId, GiftEntry>,
    custody: CustodyCapability,
}

impl DistributionStore {
    pub(crate) fn new(
        issuer: AccountId,
        entries: HashMap<AccountId, GiftEntry>,
        custody: CustodyCapability,
    ) -> Self {
        Self {
            issuer,
            entries,
            custody,
        }
    }

    #[must_use]
    pub fn issuer(&self) -> AccountId {
        self.issuer
    }

    /// Address of the custody sub-account. Knowing it grants nothing.
    #[must_use]
    pub fn custody_account(&self) -> AccountId {
        self.custody.account()
    }

    #[must_use]
    pub fn entry(&self, recipient: &AccountId) -> Option<&GiftEntry> {
        self.entries.get(recipient)
    }

    /// All entries, sorted by recipient.
    #[must_use]
    pub fn entries(&self) -> Vec<(AccountId, GiftEntry)> {
        let mut all: Vec<_> = self.entries.iter().map(|(k, v)| (*k, *v)).collect();
        all.sort_by_key(|(k, _)| *k);
        all
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of every entry's amount.
    ///
    /// # Errors
    /// `AmountOverflow` if the sum does not fit in `u64`.
    pub fn total_owed(&self) -> Result<u64> {
        self.entries.values().try_fold(0u64, |acc, e| {
            acc.checked_add(e.amount)
                .ok_or(GiftlockError::AmountOverflow)
        })
    }

    pub(crate) fn capability(&self) -> &CustodyCapability {
        &self.custody
    }

    pub(crate) fn put_entry(&mut self, recipient: AccountId, entry: GiftEntry) {
        self.entries.insert(recipient, entry);
    }

    pub(crate) fn take_entry(&mut self, recipient: &AccountId) -> Option<GiftEntry> {
        self.entries.remove(recipient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftlock_custody::AssetLedger;

    fn store_with(entries: &[(AccountId, GiftEntry)]) -> DistributionStore {
        let issuer = AccountId::random();
        let mut ledger = AssetLedger::new();
        let (_, cap) = ledger.derive_sub_account(issuer, b"seed").unwrap();
        DistributionStore::new(issuer, entries.iter().copied().collect(), cap)
    }

    #[test]
    fn entries_are_sorted() {
        let a = AccountId([1u8; 32]);
        let b = AccountId([2u8; 32]);
        let store = store_with(&[(b, GiftEntry::new(2, 0)), (a, GiftEntry::new(1, 0))]);
        let keys: Vec<_> = store.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![a, b]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn total_owed_sums_amounts() {
        let store = store_with(&[
            (AccountId::random(), GiftEntry::new(100, 1)),
            (AccountId::random(), GiftEntry::new(200, 2)),
        ]);
        assert_eq!(store.total_owed().unwrap(), 300);
    }

    #[test]
    fn total_owed_overflow() {
        let store = store_with(&[
            (AccountId::random(), GiftEntry::new(u64::MAX, 1)),
            (AccountId::random(), GiftEntry::new(1, 2)),
        ]);
        assert!(matches!(
            store.total_owed().unwrap_err(),
            GiftlockError::AmountOverflow
        ));
    }

    #[test]
    fn put_and_take_entry() {
        let mut store = store_with(&[]);
        assert_eq!(store.len(), 0);
        let r = AccountId::random();
        store.put_entry(r, GiftEntry::new(5, 100));
        assert_eq!(store.entry(&r), Some(&GiftEntry::new(5, 100)));
        assert_eq!(store.take_entry(&r), Some(GiftEntry::new(5, 100)));
        assert_eq!(store.take_entry(&r), None);
    }

    #[test]
    fn custody_account_matches_capability() {
        let store = store_with(&[]);
        assert_eq!(store.custody_account(), store.capability().account());
    }
}
