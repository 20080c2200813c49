//! # giftlock-types
//!
//! Shared types, errors, and configuration for **GiftLock**, a time-locked
//! gift escrow.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`AssetId`]
//! - **Gift model**: [`GiftEntry`], [`StoreSnapshot`]
//! - **Event model**: [`GiftEvent`], [`GiftEventKind`]
//! - **Configuration**: [`EscrowConfig`]
//! - **Errors**: [`GiftlockError`] with `GL_ERR_` prefix codes
//! - **Constants**: defaults and derivation tags

pub mod config;
pub mod constants;
pub mod entry;
pub mod error;
pub mod event;
pub mod ids;

pub use config::*;
pub use entry::*;
pub use error::*;
pub use event::*;
pub use ids::*;

// Constants are accessed via `giftlock_types::constants::FOO`.
