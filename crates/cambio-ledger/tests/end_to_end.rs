//! Full-lifecycle scenarios across the ledger: happy path, disputes,
//! cancellation, and the authorization/limit guards.

use cambio_ledger::Ledger;
use cambio_types::{
    AssetKind, CambioError, DisputeResolution, DisputeStatus, OrderId, OrderStatus,
    PaymentMethod, SettlementKind, WalletId, fee,
};

const AUTHORITY: WalletId = WalletId([0xAA; 32]);
const TREASURY: WalletId = WalletId([0xBB; 32]);
const SELLER: WalletId = WalletId([1u8; 32]);
const BUYER: WalletId = WalletId([2u8; 32]);

/// 0.5 SOL in lamports.
const AMOUNT: u64 = 500_000_000;
/// 2,000 MXN in six-decimal units.
const AMOUNT_FIAT: u64 = 2_000_000_000;

fn setup() -> Ledger {
    let mut ledger = Ledger::new();
    ledger
        .initialize_platform(AUTHORITY, TREASURY, 50)
        .unwrap();
    ledger.create_user_profile(SELLER, true, None).unwrap();
    ledger.create_user_profile(BUYER, true, None).unwrap();
    ledger.deposit_funds(SELLER, AssetKind::Sol, AMOUNT);
    ledger
}

fn create(ledger: &mut Ledger, id: &str) -> OrderId {
    let id = OrderId::from(id);
    ledger
        .create_order(
            SELLER,
            id.clone(),
            AMOUNT,
            AMOUNT_FIAT,
            AssetKind::Sol,
            PaymentMethod::Stp,
            "STP_REF_1",
        )
        .unwrap();
    id
}

#[test]
fn happy_path_settles_half_a_sol() {
    let mut ledger = setup();
    let id = create(&mut ledger, "MX-HAPPY");

    ledger.accept_order(BUYER, &id).unwrap();
    ledger.deposit_to_escrow(SELLER, &id).unwrap();
    assert_eq!(ledger.escrow_balance(&id), AMOUNT);
    assert_eq!(ledger.balance(SELLER, AssetKind::Sol), 0);

    ledger.confirm_fiat_payment(BUYER, &id, "STP-TX-0001").unwrap();
    ledger.update_oracle_status(AUTHORITY, &id, true).unwrap();
    ledger.release_funds(AUTHORITY, &id).unwrap();

    // 50 bps of 0.5 SOL = 2_500_000 lamports.
    let fee = fee::platform_fee(AMOUNT, 50);
    assert_eq!(fee, 2_500_000);
    assert_eq!(ledger.balance(BUYER, AssetKind::Sol), AMOUNT - fee);
    assert_eq!(ledger.balance(TREASURY, AssetKind::Sol), fee);
    assert_eq!(ledger.escrow_balance(&id), 0);

    let order = ledger.order(&id).unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    assert!(order.oracle_confirmed);
    // One version bump per transition: accept, fund, confirm, release.
    assert_eq!(order.version, 4);

    for wallet in [SELLER, BUYER] {
        let profile = ledger.profile(wallet).unwrap();
        assert_eq!(profile.total_trades, 1);
        assert_eq!(profile.successful_trades, 1);
    }
    let platform = ledger.platform().unwrap();
    assert_eq!(platform.total_volume, AMOUNT_FIAT);
    assert_eq!(platform.total_transactions, 1);

    let receipts = ledger.receipts();
    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].kind, SettlementKind::Release);
    assert_eq!(receipts[0].total_credited(), AMOUNT);
}

#[test]
fn disputed_order_splits_with_single_fee() {
    let mut ledger = setup();
    let id = create(&mut ledger, "MX-DISPUTE");

    ledger.accept_order(BUYER, &id).unwrap();
    ledger.deposit_to_escrow(SELLER, &id).unwrap();
    ledger.confirm_fiat_payment(BUYER, &id, "STP-TX-0002").unwrap();
    ledger
        .open_dispute(BUYER, &id, "seller claims fiat never arrived", "https://evidence.example/a")
        .unwrap();

    assert_eq!(ledger.order(&id).unwrap().status, OrderStatus::Disputed);
    assert_eq!(ledger.dispute(&id).unwrap().status, DisputeStatus::Open);

    ledger
        .resolve_dispute_split(AUTHORITY, &id, Some("both parties partially at fault".into()))
        .unwrap();

    let split = fee::dispute_split(AMOUNT, 50);
    assert_eq!(ledger.balance(SELLER, AssetKind::Sol), split.seller);
    assert_eq!(ledger.balance(BUYER, AssetKind::Sol), split.buyer);
    assert_eq!(ledger.balance(TREASURY, AssetKind::Sol), split.fee);
    assert_eq!(
        split.seller + split.buyer + split.fee,
        AMOUNT,
        "split must conserve every unit"
    );

    let order = ledger.order(&id).unwrap();
    assert_eq!(order.status, OrderStatus::Completed);

    let dispute = ledger.dispute(&id).unwrap();
    assert_eq!(dispute.status, DisputeStatus::Resolved);
    assert_eq!(dispute.resolution, Some(DisputeResolution::Split));
    assert_eq!(dispute.resolver, Some(AUTHORITY));

    for wallet in [SELLER, BUYER] {
        let profile = ledger.profile(wallet).unwrap();
        assert_eq!(profile.disputed_trades, 1);
        assert_eq!(profile.successful_trades, 0);
    }
}

#[test]
fn cancel_after_funding_makes_seller_whole() {
    let mut ledger = setup();
    let id = create(&mut ledger, "MX-CANCEL");

    ledger.accept_order(BUYER, &id).unwrap();
    ledger.deposit_to_escrow(SELLER, &id).unwrap();
    ledger.cancel_order(SELLER, &id).unwrap();

    assert_eq!(ledger.balance(SELLER, AssetKind::Sol), AMOUNT);
    assert_eq!(ledger.balance(TREASURY, AssetKind::Sol), 0);
    assert_eq!(ledger.escrow_balance(&id), 0);
    assert_eq!(ledger.order(&id).unwrap().status, OrderStatus::Cancelled);

    // A cancelled order accepts no further transitions.
    let err = ledger.accept_order(BUYER, &id).unwrap_err();
    assert!(matches!(err, CambioError::InvalidState { .. }));
}

#[test]
fn regulatory_ceiling_is_exact() {
    let mut ledger = setup();

    // 9,000 MXN exactly: accepted.
    ledger
        .create_order(
            SELLER,
            OrderId::from("MX-9000"),
            AMOUNT,
            9_000_000_000,
            AssetKind::Usdc,
            PaymentMethod::Spei,
            "ref",
        )
        .unwrap();

    // 10,000 MXN: rejected.
    let err = ledger
        .create_order(
            SELLER,
            OrderId::from("MX-10000"),
            AMOUNT,
            10_000_000_000,
            AssetKind::Usdc,
            PaymentMethod::Spei,
            "ref",
        )
        .unwrap_err();
    assert!(matches!(
        err,
        CambioError::ExceedsLimit {
            amount_fiat: 10_000_000_000,
            max: 9_000_000_000
        }
    ));
}

#[test]
fn authorization_matrix() {
    let mut ledger = setup();
    let id = create(&mut ledger, "MX-AUTHZ");

    // Seller cannot take their own offer.
    let err = ledger.accept_order(SELLER, &id).unwrap_err();
    assert!(matches!(err, CambioError::Unauthorized { .. }));

    ledger.accept_order(BUYER, &id).unwrap();

    // Buyer cannot fund the escrow.
    let err = ledger.deposit_to_escrow(BUYER, &id).unwrap_err();
    assert!(matches!(err, CambioError::Unauthorized { .. }));

    ledger.deposit_to_escrow(SELLER, &id).unwrap();

    // Seller cannot confirm the fiat payment on the buyer's behalf.
    let err = ledger
        .confirm_fiat_payment(SELLER, &id, "TX")
        .unwrap_err();
    assert!(matches!(err, CambioError::Unauthorized { .. }));

    ledger.confirm_fiat_payment(BUYER, &id, "TX").unwrap();

    // Neither party may attest.
    for wallet in [SELLER, BUYER] {
        let err = ledger.update_oracle_status(wallet, &id, true).unwrap_err();
        assert!(matches!(err, CambioError::Unauthorized { .. }));
    }

    // A party cannot release before the timeout window.
    ledger.update_oracle_status(AUTHORITY, &id, true).unwrap();
    let err = ledger.release_funds(SELLER, &id).unwrap_err();
    assert!(matches!(err, CambioError::Unauthorized { .. }));
}

#[test]
fn racing_buyers_second_accept_loses_cleanly() {
    let mut ledger = setup();
    let late_buyer = WalletId([3u8; 32]);
    ledger.create_user_profile(late_buyer, true, None).unwrap();
    let id = create(&mut ledger, "MX-RACE");

    ledger.accept_order(BUYER, &id).unwrap();
    let err = ledger.accept_order(late_buyer, &id).unwrap_err();
    assert!(matches!(err, CambioError::InvalidState { .. }));
    assert_eq!(ledger.order(&id).unwrap().buyer, Some(BUYER));
}

#[test]
fn attestation_is_idempotent_and_irrevocable() {
    let mut ledger = setup();
    let id = create(&mut ledger, "MX-ATTEST");
    ledger.accept_order(BUYER, &id).unwrap();
    ledger.deposit_to_escrow(SELLER, &id).unwrap();
    ledger.confirm_fiat_payment(BUYER, &id, "TX").unwrap();

    // False first: no-op, retryable.
    ledger.update_oracle_status(AUTHORITY, &id, false).unwrap();
    assert!(!ledger.order(&id).unwrap().oracle_confirmed);

    // True, then true again: idempotent.
    ledger.update_oracle_status(AUTHORITY, &id, true).unwrap();
    ledger.update_oracle_status(AUTHORITY, &id, true).unwrap();
    assert!(ledger.order(&id).unwrap().oracle_confirmed);

    // False after true: conflict.
    let err = ledger
        .update_oracle_status(AUTHORITY, &id, false)
        .unwrap_err();
    assert!(matches!(err, CambioError::AttestationConflict(_)));
    assert!(ledger.order(&id).unwrap().oracle_confirmed);
}

#[test]
fn paused_platform_rejects_new_activity_but_preserves_state() {
    let mut ledger = setup();
    let id = create(&mut ledger, "MX-PAUSE");
    ledger.accept_order(BUYER, &id).unwrap();
    ledger.deposit_to_escrow(SELLER, &id).unwrap();

    ledger.set_platform_active(AUTHORITY, false).unwrap();
    let err = ledger
        .confirm_fiat_payment(BUYER, &id, "TX")
        .unwrap_err();
    assert!(matches!(err, CambioError::PlatformInactive));
    // Escrow untouched by the pause.
    assert_eq!(ledger.escrow_balance(&id), AMOUNT);

    ledger.set_platform_active(AUTHORITY, true).unwrap();
    ledger.confirm_fiat_payment(BUYER, &id, "TX").unwrap();
    assert_eq!(
        ledger.order(&id).unwrap().status,
        OrderStatus::PaymentConfirmed
    );
}

#[test]
fn fund_conservation_across_mixed_outcomes() {
    let mut ledger = setup();
    ledger.deposit_funds(SELLER, AssetKind::Sol, 2 * AMOUNT);
    let total_supply = 3 * AMOUNT;

    // Order A: settles normally.
    let a = create(&mut ledger, "MX-A");
    ledger.accept_order(BUYER, &a).unwrap();
    ledger.deposit_to_escrow(SELLER, &a).unwrap();
    ledger.confirm_fiat_payment(BUYER, &a, "TXA").unwrap();
    ledger.update_oracle_status(AUTHORITY, &a, true).unwrap();
    ledger.release_funds(AUTHORITY, &a).unwrap();

    // Order B: cancelled after funding.
    let b = create(&mut ledger, "MX-B");
    ledger.accept_order(BUYER, &b).unwrap();
    ledger.deposit_to_escrow(SELLER, &b).unwrap();
    ledger.cancel_order(SELLER, &b).unwrap();

    // Order C: disputed, refunded to buyer.
    let c = create(&mut ledger, "MX-C");
    ledger.accept_order(BUYER, &c).unwrap();
    ledger.deposit_to_escrow(SELLER, &c).unwrap();
    ledger.open_dispute(BUYER, &c, "no delivery", "").unwrap();
    ledger
        .resolve_dispute_refund_buyer(AUTHORITY, &c, None)
        .unwrap();

    let held = ledger.balance(SELLER, AssetKind::Sol)
        + ledger.balance(BUYER, AssetKind::Sol)
        + ledger.balance(TREASURY, AssetKind::Sol);
    assert_eq!(held, total_supply, "no unit minted or burned");
    for id in [&a, &b, &c] {
        assert_eq!(ledger.escrow_balance(id), 0);
    }
    assert_eq!(ledger.receipts().len(), 3);
}
