//! Events emitted by successful ledger operations.
//!
//! Every state transition that commits appends exactly one [`GiftEvent`]
//! to the ledger's append-only log. Failed operations emit nothing.

use serde::{Deserialize, Serialize};

use crate::AccountId;

/// The kind of transition an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GiftEventKind {
    /// A distribution store was created and funded.
    StoreInitialized,
    /// A gift was created or topped up.
    GiftAdded,
    /// A gift was revoked and refunded to the issuer.
    GiftRemoved,
    /// A recipient withdrew an unlocked gift.
    GiftClaimed,
}

impl std::fmt::Display for GiftEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreInitialized => write!(f, "STORE_INITIALIZED"),
            Self::GiftAdded => write!(f, "GIFT_ADDED"),
            Self::GiftRemoved => write!(f, "GIFT_REMOVED"),
            Self::GiftClaimed => write!(f, "GIFT_CLAIMED"),
        }
    }
}

/// A committed ledger transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftEvent {
    /// Position in the log, starting at zero.
    pub sequence: u64,
    pub kind: GiftEventKind,
    pub issuer: AccountId,
    /// `None` for [`GiftEventKind::StoreInitialized`].
    pub recipient: Option<AccountId>,
    /// Funds moved by this transition.
    pub amount: u64,
    /// Unlock time in force after the transition, where one applies.
    pub unlock_time: Option<u64>,
    /// Clock reading when the transition committed.
    pub timestamp: u64,
}
