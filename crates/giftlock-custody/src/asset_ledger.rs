//! Asset ledger: the transfer primitive the escrow core builds on.
//!
//! Tracks per-(account, asset) balances. All mutations are atomic: either
//! the full operation succeeds or every balance is unchanged.
//!
//! Derived sub-accounts are capability-gated. [`AssetLedger::transfer`]
//! refuses to debit them; only [`AssetLedger::transfer_from_custody`] with
//! the matching [`CustodyCapability`] can.

use std::collections::{HashMap, HashSet};

use giftlock_types::{AccountId, AssetId, GiftlockError, Result};

use crate::sub_account::{CustodyCapability, derive_address};

/// Source of truth for all balances.
pub struct AssetLedger {
    /// Per-(account, asset) balances.
    balances: HashMap<(AccountId, AssetId), u64>,
    /// Accounts opted into holding exactly one asset.
    registrations: HashMap<AccountId, AssetId>,
    /// Addresses minted through `derive_sub_account`.
    sub_accounts: HashSet<AccountId>,
}

impl AssetLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            registrations: HashMap::new(),
            sub_accounts: HashSet::new(),
        }
    }

    /// Credit funds from outside the system (faucet / bridge-in).
    ///
    /// # Errors
    /// `AmountOverflow` if the balance would exceed `u64::MAX`;
    /// `UnauthorizedCustodyTransfer` for sub-accounts, which are only
    /// ever funded by transfer.
    pub fn deposit(&mut self, account: AccountId, asset: &str, amount: u64) -> Result<()> {
        if self.sub_accounts.contains(&account) {
            return Err(GiftlockError::UnauthorizedCustodyTransfer(account));
        }
        let entry = self
            .balances
            .entry((account, asset.to_string()))
            .or_default();
        *entry = entry
            .checked_add(amount)
            .ok_or(GiftlockError::AmountOverflow)?;
        Ok(())
    }

    /// Derive the sub-account for `(owner, seed)` and mint its capability.
    ///
    /// # Errors
    /// `AccountAlreadyExists` if this pair was derived before. The
    /// capability is minted once and never again.
    pub fn derive_sub_account(
        &mut self,
        owner: AccountId,
        seed: &[u8],
    ) -> Result<(AccountId, CustodyCapability)> {
        let account = derive_address(owner, seed);
        if !self.sub_accounts.insert(account) {
            return Err(GiftlockError::AccountAlreadyExists(account));
        }
        tracing::debug!(owner = %owner, account = %account, "Sub-account derived");
        Ok((account, CustodyCapability::mint(account)))
    }

    /// Opt `account` into holding `asset`. Allowed once per account.
    ///
    /// # Errors
    /// `AccountAlreadyRegistered` on a second registration.
    pub fn register_account(&mut self, account: AccountId, asset: &str) -> Result<()> {
        if self.registrations.contains_key(&account) {
            return Err(GiftlockError::AccountAlreadyRegistered(account));
        }
        self.registrations.insert(account, asset.to_string());
        Ok(())
    }

    /// Forget a sub-account whose balance is zero, consuming its capability.
    ///
    /// Used to roll back a custody account that was created for an
    /// operation that then failed.
    ///
    /// # Errors
    /// `Internal` if funds are still held.
    pub fn retire_sub_account(&mut self, capability: CustodyCapability) -> Result<()> {
        let account = capability.account();
        let held: u64 = self
            .balances
            .iter()
            .filter(|((a, _), _)| *a == account)
            .fold(0u64, |acc, (_, v)| acc.saturating_add(*v));
        if held != 0 {
            return Err(GiftlockError::Internal(format!(
                "cannot retire {account}: still holds {held}"
            )));
        }
        self.balances.retain(|(a, _), _| *a != account);
        self.registrations.remove(&account);
        self.sub_accounts.remove(&account);
        Ok(())
    }

    /// Move `amount` of `asset` between ordinary accounts.
    ///
    /// # Errors
    /// - `UnauthorizedCustodyTransfer` if `from` is a sub-account
    /// - `InsufficientBalance` if `from` holds less than `amount`
    /// - `AccountNotRegistered` / `AssetMismatch` if `to` is a sub-account
    ///   not registered for `asset`
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        asset: &str,
        amount: u64,
    ) -> Result<()> {
        if self.sub_accounts.contains(&from) {
            return Err(GiftlockError::UnauthorizedCustodyTransfer(from));
        }
        self.move_funds(from, to, asset, amount)
    }

    /// Move `amount` out of the sub-account controlled by `capability`.
    ///
    /// Custody funds only ever leave to ordinary accounts.
    ///
    /// # Errors
    /// `UnauthorizedCustodyTransfer` if `to` is a sub-account, otherwise as
    /// [`AssetLedger::transfer`] minus the authorization check.
    pub fn transfer_from_custody(
        &mut self,
        capability: &CustodyCapability,
        to: AccountId,
        asset: &str,
        amount: u64,
    ) -> Result<()> {
        if self.sub_accounts.contains(&to) {
            return Err(GiftlockError::UnauthorizedCustodyTransfer(to));
        }
        self.move_funds(capability.account(), to, asset, amount)
    }

    fn move_funds(&mut self, from: AccountId, to: AccountId, asset: &str, amount: u64) -> Result<()> {
        self.check_asset(from, asset)?;
        self.check_asset(to, asset)?;

        let available = self.balance(from, asset);
        if available < amount {
            return Err(GiftlockError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to, asset)
            .checked_add(amount)
            .ok_or(GiftlockError::AmountOverflow)?;

        // Both sides validated; commit.
        self.balances
            .insert((from, asset.to_string()), available - amount);
        self.balances.insert((to, asset.to_string()), credited);

        tracing::debug!(from = %from, to = %to, asset, amount, "Transfer committed");
        Ok(())
    }

    /// Sub-accounts must be registered, and only for the asset moved.
    fn check_asset(&self, account: AccountId, asset: &str) -> Result<()> {
        if !self.sub_accounts.contains(&account) {
            return Ok(());
        }
        match self.registrations.get(&account) {
            None => Err(GiftlockError::AccountNotRegistered(account)),
            Some(registered) if registered != asset => Err(GiftlockError::AssetMismatch {
                account,
                registered: registered.clone(),
                got: asset.to_string(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Balance of `account` in `asset`. Zero if never funded.
    #[must_use]
    pub fn balance(&self, account: AccountId, asset: &str) -> u64 {
        self.balances
            .get(&(account, asset.to_string()))
            .copied()
            .unwrap_or_default()
    }

    /// Whether `account` is a capability-gated sub-account.
    #[must_use]
    pub fn is_sub_account(&self, account: AccountId) -> bool {
        self.sub_accounts.contains(&account)
    }
}

impl Default for AssetLedger {
    fn default() -> Self {
        Self::new()
    }
}
