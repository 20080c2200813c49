//! System-wide constants for GiftLock.

/// Default escrowed asset.
pub const DEFAULT_ASSET: &str = "APT";

/// Default seed for deriving an issuer's custody sub-account.
pub const DEFAULT_CUSTODY_SEED: &str = "gift_distribution";

/// Domain separation tag for sub-account derivation.
pub const SUB_ACCOUNT_DOMAIN: &[u8] = b"giftlock:sub_account:v1:";
