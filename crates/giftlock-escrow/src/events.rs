//! Append-only log of committed ledger transitions.

use giftlock_types::{AccountId, GiftEvent, GiftEventKind};

/// In-memory event log. Sequence numbers are dense, starting at zero.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<GiftEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its sequence number.
    pub(crate) fn record(
        &mut self,
        kind: GiftEventKind,
        issuer: AccountId,
        recipient: Option<AccountId>,
        amount: u64,
        unlock_time: Option<u64>,
        timestamp: u64,
    ) -> u64 {
        let sequence = self.events.len() as u64;
        self.events.push(GiftEvent {
            sequence,
            kind,
            issuer,
            recipient,
            amount,
            unlock_time,
            timestamp,
        });
        sequence
    }

    #[must_use]
    pub fn all(&self) -> &[GiftEvent] {
        &self.events
    }

    /// Events touching one issuer's store, in commit order.
    pub fn for_issuer(&self, issuer: AccountId) -> impl Iterator<Item = &GiftEvent> {
        self.events.iter().filter(move |e| e.issuer == issuer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_are_dense() {
        let mut log = EventLog::new();
        let issuer = AccountId::random();
        let a = log.record(GiftEventKind::StoreInitialized, issuer, None, 10, None, 1);
        let b = log.record(
            GiftEventKind::GiftAdded,
            issuer,
            Some(AccountId::random()),
            5,
            Some(9),
            2,
        );
        assert_eq!((a, b), (0, 1));
        assert_eq!(log.all().len(), 2);
        assert_eq!(log.all()[1].kind, GiftEventKind::GiftAdded);
    }

    #[test]
    fn filters_by_issuer() {
        let mut log = EventLog::new();
        let (x, y) = (AccountId::random(), AccountId::random());
        log.record(GiftEventKind::StoreInitialized, x, None, 1, None, 0);
        log.record(GiftEventKind::StoreInitialized, y, None, 2, None, 0);
        log.record(GiftEventKind::GiftRemoved, x, Some(y), 1, None, 3);
        assert_eq!(log.for_issuer(x).count(), 2);
        assert_eq!(log.for_issuer(y).count(), 1);
    }
}
