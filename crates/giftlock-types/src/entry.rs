//! Gift entries and the public view of a distribution store.

use serde::{Deserialize, Serialize};

use crate::AccountId;

/// A recipient's current locked allocation.
///
/// `amount` is denominated in the escrowed asset's smallest unit.
/// `unlock_time` is the earliest timestamp (seconds) at which the gift
/// becomes claimable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GiftEntry {
    pub amount: u64,
    pub unlock_time: u64,
}

impl GiftEntry {
    #[must_use]
    pub fn new(amount: u64, unlock_time: u64) -> Self {
        Self {
            amount,
            unlock_time,
        }
    }

    /// Whether the gift can be claimed at `now`. Inclusive.
    #[must_use]
    pub fn is_unlocked(&self, now: u64) -> bool {
        now >= self.unlock_time
    }
}

/// Serializable, capability-free view of one issuer's distribution store.
///
/// Entries are sorted by recipient so snapshots compare deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub issuer: AccountId,
    pub custody_account: AccountId,
    pub custody_balance: u64,
    pub entries: Vec<(AccountId, GiftEntry)>,
}

impl StoreSnapshot {
    /// Sum of all entry amounts. Saturates rather than overflowing.
    #[must_use]
    pub fn total_owed(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, (_, e)| acc.saturating_add(e.amount))
    }
}
