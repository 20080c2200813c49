//! # giftlock-escrow
//!
//! **Escrow ledger**: per-issuer distribution stores of time-locked gifts,
//! backed by capability-gated custody accounts.
//!
//! ## Architecture
//!
//! 1. **DistributionStore**: recipient → gift map plus the custody capability
//! 2. **StoreRegistry**: one store per issuer, owned by the ledger service
//! 3. **Guards**: existence, length, and time-lock preconditions
//! 4. **GiftLedger**: `initialize` / `add_gift` / `remove_gift` / `claim_gift`
//! 5. **Conservation**: custody balance == Σ outstanding gifts
//!
//! ## Operation Flow
//!
//! ```text
//! caller → guards → transfer (issuer ↔ custody ↔ recipient) → entry map → event
//! ```
//!
//! A failure at any step returns before the entry map is touched.

pub mod conservation;
pub mod events;
pub mod guards;
pub mod ledger;
pub mod registry;
pub mod store;

pub use events::EventLog;
pub use ledger::GiftLedger;
pub use registry::StoreRegistry;
pub use store::DistributionStore;
