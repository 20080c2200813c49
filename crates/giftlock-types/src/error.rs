//! Error types for GiftLock.
//!
//! All errors use the `GL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Distribution store errors
//! - 2xx: Gift entry / input errors
//! - 3xx: Balance and custody errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{AccountId, AssetId};

/// Central error enum for all GiftLock operations.
///
/// Every variant is terminal for the operation that raised it: the
/// operation is discarded with no observable state change.
#[derive(Debug, Error)]
pub enum GiftlockError {
    // =================================================================
    // Store Errors (1xx)
    // =================================================================
    /// A distribution store already exists for this issuer.
    #[error("GL_ERR_100: Distribution store already exists for issuer {0}")]
    StoreAlreadyExists(AccountId),

    /// No distribution store exists for this issuer.
    #[error("GL_ERR_101: Distribution store not found for issuer {0}")]
    StoreNotFound(AccountId),

    // =================================================================
    // Entry / Input Errors (2xx)
    // =================================================================
    /// The parallel input sequences of an initialize call differ in length.
    #[error(
        "GL_ERR_200: Length mismatch: {addresses} addresses, {amounts} amounts, {unlock_times} unlock times"
    )]
    LengthMismatch {
        addresses: usize,
        amounts: usize,
        unlock_times: usize,
    },

    /// The same recipient appears twice in one initialize call.
    #[error("GL_ERR_201: Duplicate recipient {0}")]
    DuplicateRecipient(AccountId),

    /// The issuer's store has no gift for this recipient.
    #[error("GL_ERR_202: No gift for recipient {recipient} in store of issuer {issuer}")]
    EntryNotFound {
        issuer: AccountId,
        recipient: AccountId,
    },

    /// The gift exists but its unlock time has not been reached.
    #[error("GL_ERR_203: Gift still locked: unlocks at {unlock_time}, now {now}")]
    TimeLockActive { unlock_time: u64, now: u64 },

    /// Summing or accumulating amounts would overflow `u64`.
    #[error("GL_ERR_204: Amount overflow")]
    AmountOverflow,

    /// Gifts cannot be addressed to a custody sub-account.
    #[error("GL_ERR_205: Recipient {0} is a custody account")]
    CustodyRecipient(AccountId),

    // =================================================================
    // Balance / Custody Errors (3xx)
    // =================================================================
    /// Not enough balance to perform the transfer.
    #[error("GL_ERR_300: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    /// A sub-account for this (owner, seed) pair was already derived.
    #[error("GL_ERR_301: Account already exists: {0}")]
    AccountAlreadyExists(AccountId),

    /// The account is already registered to hold an asset.
    #[error("GL_ERR_302: Account {0} already registered")]
    AccountAlreadyRegistered(AccountId),

    /// A custody account received a transfer before registering an asset.
    #[error("GL_ERR_303: Account {0} not registered for any asset")]
    AccountNotRegistered(AccountId),

    /// A transfer used an asset the custody account is not registered for.
    #[error("GL_ERR_304: Asset mismatch on {account}: registered {registered}, got {got}")]
    AssetMismatch {
        account: AccountId,
        registered: AssetId,
        got: AssetId,
    },

    /// An ordinary transfer tried to debit a capability-gated account.
    #[error("GL_ERR_305: Unauthorized transfer from custody account {0}")]
    UnauthorizedCustodyTransfer(AccountId),

    /// Custody balance diverged from the sum of gift entries.
    #[error("GL_ERR_306: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("GL_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Configuration error (invalid config document, empty fields, etc.).
    #[error("GL_ERR_901: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, GiftlockError>;
