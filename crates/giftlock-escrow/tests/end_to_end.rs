//! End-to-end scenarios across the custody primitives and the escrow ledger.
//!
//! These exercise full gift lifecycles: funding, top-ups, revocation,
//! time-locked claims, and isolation between issuers.

use giftlock_custody::ManualClock;
use giftlock_escrow::GiftLedger;
use giftlock_types::*;

const T0: u64 = 1_700_000_000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

fn ledger() -> (GiftLedger<ManualClock>, ManualClock) {
    init_tracing();
    let clock = ManualClock::at(T0);
    let ledger = GiftLedger::new(EscrowConfig::default(), clock.clone()).expect("valid config");
    (ledger, clock)
}

// =============================================================================
// Test: the reference lifecycle from funding to the last claim
// =============================================================================
#[test]
fn e2e_full_lifecycle() {
    let (mut ledger, clock) = ledger();
    let issuer = AccountId::random();
    let (r1, r2) = (AccountId::random(), AccountId::random());
    ledger.deposit(issuer, 1_000).unwrap();

    ledger
        .initialize(issuer, &[r1, r2], &[100, 200], &[T0 + 10, T0 + 20])
        .unwrap();
    assert_eq!(ledger.custody_balance(issuer).unwrap(), 300);

    clock.set(T0 + 10);
    ledger.claim_gift(r1, issuer).unwrap();
    assert_eq!(ledger.balance(r1), 100);
    assert_eq!(ledger.custody_balance(issuer).unwrap(), 200);

    ledger.add_gift(issuer, r2, 50, T0 + 5).unwrap();
    assert_eq!(ledger.entry(issuer, r2), Some(GiftEntry::new(250, T0 + 5)));
    assert_eq!(ledger.custody_balance(issuer).unwrap(), 250);

    clock.set(T0 + 6);
    ledger.claim_gift(r2, issuer).unwrap();
    assert_eq!(ledger.balance(r2), 250);
    assert_eq!(ledger.custody_balance(issuer).unwrap(), 0);
    assert_eq!(ledger.balance(issuer), 650);

    assert!(ledger.entries(issuer).unwrap().is_empty());
    assert!(ledger.verify_conservation(issuer).is_ok());
}

// =============================================================================
// Test: issuers are isolated from each other
// =============================================================================
#[test]
fn e2e_issuers_do_not_interfere() {
    let (mut ledger, clock) = ledger();
    let (a, b) = (AccountId::random(), AccountId::random());
    let shared = AccountId::random();
    ledger.deposit(a, 500).unwrap();
    ledger.deposit(b, 500).unwrap();

    ledger.initialize(a, &[shared], &[100], &[T0]).unwrap();
    ledger.initialize(b, &[shared], &[300], &[T0 + 100]).unwrap();
    let b_before = ledger.snapshot(b).unwrap();

    ledger.add_gift(a, shared, 50, T0).unwrap();
    ledger.add_gift(a, AccountId::random(), 20, T0).unwrap();
    ledger.remove_gift(a, shared).unwrap();
    clock.advance(1);

    assert_eq!(ledger.snapshot(b).unwrap(), b_before);
    assert_ne!(
        ledger.snapshot(a).unwrap().custody_account,
        b_before.custody_account
    );

    // The shared recipient's gift from B is still locked.
    let err = ledger.claim_gift(shared, b).unwrap_err();
    assert!(matches!(err, GiftlockError::TimeLockActive { .. }));
    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(ledger.issuers(), expected);
    assert!(ledger.verify_all_conservation().is_ok());

    // Neither issuer can gift into the other's custody.
    let err = ledger
        .add_gift(a, b_before.custody_account, 10, T0)
        .unwrap_err();
    assert!(matches!(err, GiftlockError::CustodyRecipient(_)));
    assert_eq!(ledger.snapshot(b).unwrap(), b_before);
}

// =============================================================================
// Test: failures leave balances, entries, and events untouched
// =============================================================================
#[test]
fn e2e_failed_operations_have_no_effect() {
    let (mut ledger, _clock) = ledger();
    let issuer = AccountId::random();
    let r = AccountId::random();
    ledger.deposit(issuer, 100).unwrap();
    ledger.initialize(issuer, &[r], &[60], &[T0 + 30]).unwrap();

    let snapshot = ledger.snapshot(issuer).unwrap();
    let events = ledger.events().len();

    assert!(ledger.add_gift(issuer, r, 41, T0).is_err());
    assert!(ledger.claim_gift(r, issuer).is_err());
    assert!(ledger.claim_gift(AccountId::random(), issuer).is_err());
    assert!(ledger.initialize(issuer, &[], &[], &[]).is_err());

    assert_eq!(ledger.snapshot(issuer).unwrap(), snapshot);
    assert_eq!(ledger.events().len(), events);
    assert_eq!(ledger.balance(issuer), 40);
}

// =============================================================================
// Test: revoke, re-gift, and claim once unlocked
// =============================================================================
#[test]
fn e2e_revoke_then_regift() {
    let (mut ledger, clock) = ledger();
    let issuer = AccountId::random();
    let r = AccountId::random();
    ledger.deposit(issuer, 1_000).unwrap();
    ledger.initialize(issuer, &[r], &[500], &[T0 + 60]).unwrap();

    ledger.remove_gift(issuer, r).unwrap();
    assert_eq!(ledger.balance(issuer), 1_000);
    // Removing again is a quiet no-op.
    ledger.remove_gift(issuer, r).unwrap();

    ledger.add_gift(issuer, r, 700, T0 + 120).unwrap();
    clock.set(T0 + 119);
    assert!(matches!(
        ledger.claim_gift(r, issuer).unwrap_err(),
        GiftlockError::TimeLockActive { .. }
    ));
    clock.set(T0 + 120);
    ledger.claim_gift(r, issuer).unwrap();

    assert_eq!(ledger.balance(r), 700);
    assert_eq!(ledger.balance(issuer), 300);
    assert_eq!(
        ledger
            .events_for(issuer)
            .map(|e| e.kind)
            .collect::<Vec<_>>(),
        vec![
            GiftEventKind::StoreInitialized,
            GiftEventKind::GiftRemoved,
            GiftEventKind::GiftAdded,
            GiftEventKind::GiftClaimed,
        ]
    );
}

// =============================================================================
// Test: snapshots and events serialize for external consumers
// =============================================================================
#[test]
fn e2e_snapshot_and_events_serialize() {
    let (mut ledger, _clock) = ledger();
    let issuer = AccountId::random();
    ledger.deposit(issuer, 10).unwrap();
    ledger
        .initialize(issuer, &[AccountId::random()], &[10], &[T0])
        .unwrap();

    let snap = ledger.snapshot(issuer).unwrap();
    let json = serde_json::to_string(&snap).unwrap();
    let back: StoreSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);

    let json = serde_json::to_string(ledger.events()).unwrap();
    let back: Vec<GiftEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ledger.events());
}

// =============================================================================
// Test: a JSON config selects the escrowed asset
// =============================================================================
#[test]
fn e2e_configured_asset() {
    init_tracing();
    let config = EscrowConfig::from_json(r#"{"asset":"USDC","custody_seed":"gifts-v2"}"#).unwrap();
    let mut ledger = GiftLedger::new(config, ManualClock::at(T0)).unwrap();
    let issuer = AccountId::random();
    let r = AccountId::random();

    ledger.deposit(issuer, 42).unwrap();
    ledger.initialize(issuer, &[r], &[42], &[T0]).unwrap();
    ledger.claim_gift(r, issuer).unwrap();

    assert_eq!(ledger.config().asset, "USDC");
    assert_eq!(ledger.balance(r), 42);
}
