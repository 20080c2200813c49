//! # giftlock-custody
//!
//! The external primitives the escrow core consumes:
//!
//! 1. **AssetLedger**: per-(account, asset) balances, one-time asset
//!    registration, and atomic transfers
//! 2. **Sub-accounts**: deterministic derivation of custody addresses and
//!    the non-duplicable [`CustodyCapability`] that gates them
//! 3. **Clock**: nondecreasing timestamps in seconds
//!
//! ```text
//! issuer ──transfer()──▶ custody sub-account ──transfer_from_custody(&cap)──▶ recipient
//! ```

pub mod asset_ledger;
pub mod clock;
pub mod sub_account;

pub use asset_ledger::AssetLedger;
#[cfg(any(test, feature = "test-helpers"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use sub_account::{CustodyCapability, derive_address};
