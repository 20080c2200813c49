//! Gift ledger — the escrow state machine.
//!
//! ```text
//!              add_gift                 clock ≥ unlock_time
//!   absent ───────────────▶ locked ─────────────────────────▶ claimable
//!     ▲                       │ remove_gift                      │ claim_gift
//!     └───────────────────────┴──────────────────────────────────┘
//! ```
//!
//! Every operation runs its guards first, then performs the one transfer
//! it needs, and only then touches the entry map. A failing guard or
//! transfer returns before any mutation, so operations are all-or-nothing.

use std::collections::HashMap;

use giftlock_custody::{AssetLedger, Clock, derive_address};
use giftlock_types::{
    AccountId, EscrowConfig, GiftEntry, GiftEvent, GiftEventKind, GiftlockError, Result,
    StoreSnapshot,
};

use crate::conservation;
use crate::events::EventLog;
use crate::guards;
use crate::registry::StoreRegistry;
use crate::store::DistributionStore;

/// Service owning balances, every issuer's store, the clock, and the
/// event log.
pub struct GiftLedger<C: Clock> {
    config: EscrowConfig,
    assets: AssetLedger,
    stores: StoreRegistry,
    events: EventLog,
    clock: C,
}

impl<C: Clock> GiftLedger<C> {
    /// Create an empty ledger.
    ///
    /// # Errors
    /// `Configuration` if `config` fails validation.
    pub fn new(config: EscrowConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            assets: AssetLedger::new(),
            stores: StoreRegistry::new(),
            events: EventLog::new(),
            clock,
        })
    }

    // ---------------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------------

    /// Create and fund `issuer`'s store from three parallel sequences.
    ///
    /// Derives the custody sub-account, registers it for the configured
    /// asset, and moves `Σ amounts` into it from the issuer.
    ///
    /// # Errors
    /// `StoreAlreadyExists`, `LengthMismatch`, `CustodyRecipient`,
    /// `DuplicateRecipient`, `AmountOverflow`, `InsufficientBalance`.
    pub fn initialize(
        &mut self,
        issuer: AccountId,
        addresses: &[AccountId],
        amounts: &[u64],
        unlock_times: &[u64],
    ) -> Result<()> {
        guards::store_absent(&self.stores, issuer)?;
        guards::lengths_equal(addresses, amounts, unlock_times)?;

        let custody_address = derive_address(issuer, self.config.custody_seed.as_bytes());
        let mut entries = HashMap::with_capacity(addresses.len());
        let mut total: u64 = 0;
        for ((&recipient, &amount), &unlock_time) in
            addresses.iter().zip(amounts).zip(unlock_times)
        {
            guards::recipient_not_custody(&self.assets, custody_address, recipient)?;
            if entries
                .insert(recipient, GiftEntry::new(amount, unlock_time))
                .is_some()
            {
                return Err(GiftlockError::DuplicateRecipient(recipient));
            }
            total = total
                .checked_add(amount)
                .ok_or(GiftlockError::AmountOverflow)?;
        }

        let asset = self.config.asset.clone();
        let (custody, capability) = self
            .assets
            .derive_sub_account(issuer, self.config.custody_seed.as_bytes())?;

        let funded = self
            .assets
            .register_account(custody, &asset)
            .and_then(|()| self.assets.transfer(issuer, custody, &asset, total));
        if let Err(err) = funded {
            // Undo the sub-account so the failed call leaves no trace.
            if let Err(retire_err) = self.assets.retire_sub_account(capability) {
                tracing::error!(
                    issuer = %issuer,
                    custody = %custody,
                    error = %retire_err,
                    "Custody rollback failed"
                );
            }
            tracing::warn!(issuer = %issuer, total, error = %err, "Initialize rejected");
            return Err(err);
        }

        let recipients = entries.len();
        self.stores
            .put(DistributionStore::new(issuer, entries, capability))?;

        let now = self.clock.now();
        self.events.record(
            GiftEventKind::StoreInitialized,
            issuer,
            None,
            total,
            None,
            now,
        );
        tracing::info!(
            issuer = %issuer,
            custody = %custody,
            recipients,
            total,
            "Distribution store initialized"
        );
        Ok(())
    }

    /// Create or top up `recipient`'s gift in `issuer`'s store.
    ///
    /// An existing entry accumulates `amount` and takes `unlock_time`
    /// as-is, even when that is earlier than the current lock. Only the
    /// incremental `amount` is transferred.
    ///
    /// # Errors
    /// `StoreNotFound`, `CustodyRecipient`, `AmountOverflow`,
    /// `InsufficientBalance`.
    pub fn add_gift(
        &mut self,
        issuer: AccountId,
        recipient: AccountId,
        amount: u64,
        unlock_time: u64,
    ) -> Result<()> {
        let store = guards::store_exists(&self.stores, issuer)?;
        guards::recipient_not_custody(&self.assets, store.custody_account(), recipient)?;
        let merged = match store.entry(&recipient) {
            Some(existing) => GiftEntry::new(
                existing
                    .amount
                    .checked_add(amount)
                    .ok_or(GiftlockError::AmountOverflow)?,
                unlock_time,
            ),
            None => GiftEntry::new(amount, unlock_time),
        };
        let custody = store.custody_account();

        self.assets
            .transfer(issuer, custody, &self.config.asset, amount)?;
        self.store_mut(issuer)?.put_entry(recipient, merged);

        let now = self.clock.now();
        self.events.record(
            GiftEventKind::GiftAdded,
            issuer,
            Some(recipient),
            amount,
            Some(unlock_time),
            now,
        );
        tracing::info!(
            issuer = %issuer,
            recipient = %recipient,
            amount,
            total = merged.amount,
            unlock_time,
            "Gift added"
        );
        Ok(())
    }

    /// Revoke `recipient`'s gift and refund it to the issuer.
    ///
    /// A recipient without a gift is a successful no-op.
    ///
    /// # Errors
    /// `StoreNotFound`.
    pub fn remove_gift(&mut self, issuer: AccountId, recipient: AccountId) -> Result<()> {
        let store = guards::store_exists(&self.stores, issuer)?;
        let Some(entry) = store.entry(&recipient).copied() else {
            tracing::debug!(issuer = %issuer, recipient = %recipient, "No gift to remove");
            return Ok(());
        };

        self.assets.transfer_from_custody(
            store.capability(),
            issuer,
            &self.config.asset,
            entry.amount,
        )?;
        self.store_mut(issuer)?.take_entry(&recipient);

        let now = self.clock.now();
        self.events.record(
            GiftEventKind::GiftRemoved,
            issuer,
            Some(recipient),
            entry.amount,
            None,
            now,
        );
        tracing::info!(
            issuer = %issuer,
            recipient = %recipient,
            amount = entry.amount,
            "Gift removed and refunded"
        );
        Ok(())
    }

    /// Pay out `recipient`'s unlocked gift from `issuer`'s store.
    ///
    /// # Errors
    /// `StoreNotFound`, `EntryNotFound`, `TimeLockActive`.
    pub fn claim_gift(&mut self, recipient: AccountId, issuer: AccountId) -> Result<()> {
        let now = self.clock.now();
        let store = guards::store_exists(&self.stores, issuer)?;
        let entry = match guards::unlock_reached(store, recipient, now) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(issuer = %issuer, recipient = %recipient, now, error = %err, "Claim rejected");
                return Err(err);
            }
        };

        self.assets.transfer_from_custody(
            store.capability(),
            recipient,
            &self.config.asset,
            entry.amount,
        )?;
        self.store_mut(issuer)?.take_entry(&recipient);

        self.events.record(
            GiftEventKind::GiftClaimed,
            issuer,
            Some(recipient),
            entry.amount,
            Some(entry.unlock_time),
            now,
        );
        tracing::info!(
            issuer = %issuer,
            recipient = %recipient,
            amount = entry.amount,
            "Gift claimed"
        );
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Funding & queries
    // ---------------------------------------------------------------------

    /// Credit `account` with the escrowed asset from outside the system.
    pub fn deposit(&mut self, account: AccountId, amount: u64) -> Result<()> {
        self.assets.deposit(account, &self.config.asset, amount)
    }

    /// Balance of `account` in the escrowed asset.
    #[must_use]
    pub fn balance(&self, account: AccountId) -> u64 {
        self.assets.balance(account, &self.config.asset)
    }

    /// Whether `issuer` has a distribution store.
    #[must_use]
    pub fn store_exists(&self, issuer: AccountId) -> bool {
        self.stores.exists(&issuer)
    }

    /// Read-only access to an issuer's store.
    #[must_use]
    pub fn store(&self, issuer: AccountId) -> Option<&DistributionStore> {
        self.stores.get(&issuer)
    }

    /// `recipient`'s current gift from `issuer`, if any.
    #[must_use]
    pub fn entry(&self, issuer: AccountId, recipient: AccountId) -> Option<GiftEntry> {
        self.stores
            .get(&issuer)
            .and_then(|s| s.entry(&recipient).copied())
    }

    /// All of `issuer`'s gifts, sorted by recipient.
    pub fn entries(&self, issuer: AccountId) -> Result<Vec<(AccountId, GiftEntry)>> {
        Ok(guards::store_exists(&self.stores, issuer)?.entries())
    }

    /// Balance held by `issuer`'s custody account.
    pub fn custody_balance(&self, issuer: AccountId) -> Result<u64> {
        let store = guards::store_exists(&self.stores, issuer)?;
        Ok(self.balance(store.custody_account()))
    }

    /// Capability-free, serializable view of `issuer`'s store.
    pub fn snapshot(&self, issuer: AccountId) -> Result<StoreSnapshot> {
        let store = guards::store_exists(&self.stores, issuer)?;
        Ok(StoreSnapshot {
            issuer,
            custody_account: store.custody_account(),
            custody_balance: self.balance(store.custody_account()),
            entries: store.entries(),
        })
    }

    /// Check custody balance against outstanding gifts for `issuer`.
    ///
    /// # Errors
    /// `StoreNotFound`, `SupplyInvariantViolation`.
    pub fn verify_conservation(&self, issuer: AccountId) -> Result<()> {
        let store = guards::store_exists(&self.stores, issuer)?;
        conservation::verify(store, self.balance(store.custody_account()))
    }

    /// Run [`GiftLedger::verify_conservation`] for every issuer.
    ///
    /// # Errors
    /// The first `SupplyInvariantViolation` found, in issuer order.
    pub fn verify_all_conservation(&self) -> Result<()> {
        self.issuers()
            .into_iter()
            .try_for_each(|issuer| self.verify_conservation(issuer))
    }

    /// Issuers with a store, sorted.
    #[must_use]
    pub fn issuers(&self) -> Vec<AccountId> {
        self.stores.issuers()
    }

    /// Every committed transition, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GiftEvent] {
        self.events.all()
    }

    /// Committed transitions for one issuer.
    pub fn events_for(&self, issuer: AccountId) -> impl Iterator<Item = &GiftEvent> {
        self.events.for_issuer(issuer)
    }

    #[must_use]
    pub fn config(&self) -> &EscrowConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn store_mut(&mut self, issuer: AccountId) -> Result<&mut DistributionStore> {
        self.stores
            .get_mut(&issuer)
            .ok_or(GiftlockError::StoreNotFound(issuer))
    }
}
