//! The authoritative order store and its state machine.
//!
//! This file holds the record-keeping operations: platform
//! initialization, profile creation, wallet top-ups, order creation and
//! acceptance, fiat confirmation, and the oracle attestation path. The
//! fund-moving operations (deposit, release, cancel, dispute handling)
//! live in [`crate::settlement`].

use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, warn};

use cambio_types::{
    AssetKind, CambioError, Dispute, Order, OrderId, OrderStatus, PaymentMethod, Platform,
    Result, SettlementReceipt, UserProfile, WalletId, constants,
};

use crate::balances::BalanceBook;
use crate::escrow::EscrowVault;

/// Single source of truth for orders, profiles, disputes, custody, and
/// the platform singleton.
#[derive(Debug, Default)]
pub struct Ledger {
    pub(crate) platform: Option<Platform>,
    pub(crate) profiles: HashMap<WalletId, UserProfile>,
    pub(crate) orders: HashMap<OrderId, Order>,
    pub(crate) disputes: HashMap<OrderId, Dispute>,
    pub(crate) vault: EscrowVault,
    pub(crate) balances: BalanceBook,
    pub(crate) receipts: Vec<SettlementReceipt>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =====================================================================
    // Platform singleton
    // =====================================================================

    /// Create the platform singleton. Callable exactly once; the caller
    /// becomes both admin and designated oracle/arbitrator identity.
    ///
    /// `fee_bps` is capped at 10,000 (100%): anything above would make
    /// the fee exceed the escrowed amount and break settlement math.
    pub fn initialize_platform(
        &mut self,
        authority: WalletId,
        treasury: WalletId,
        fee_bps: u16,
    ) -> Result<()> {
        if self.platform.is_some() {
            return Err(CambioError::PlatformAlreadyInitialized);
        }
        if fee_bps > constants::MAX_FEE_BPS {
            return Err(CambioError::Configuration(format!(
                "fee_bps {fee_bps} exceeds the {} bps maximum",
                constants::MAX_FEE_BPS
            )));
        }
        self.platform = Some(Platform::new(authority, treasury, fee_bps));
        info!(%authority, %treasury, fee_bps, "platform initialized");
        Ok(())
    }

    /// Pause or resume all trade-affecting operations. Admin only.
    pub fn set_platform_active(&mut self, caller: WalletId, active: bool) -> Result<()> {
        let platform = self.platform_mut()?;
        if platform.authority != caller {
            return Err(CambioError::Unauthorized {
                reason: "only the platform authority may pause or resume".to_string(),
            });
        }
        platform.is_active = active;
        info!(active, "platform activity flag updated");
        Ok(())
    }

    // =====================================================================
    // Profiles and balances
    // =====================================================================

    /// Create the caller's profile. The KYC verdict comes from the
    /// external verifier; the ledger only stores the gate.
    pub fn create_user_profile(
        &mut self,
        caller: WalletId,
        kyc_verified: bool,
        kyc_ref: Option<String>,
    ) -> Result<()> {
        if self.profiles.contains_key(&caller) {
            return Err(CambioError::ProfileAlreadyExists(caller));
        }
        self.profiles
            .insert(caller, UserProfile::new(caller, kyc_verified, kyc_ref));
        info!(wallet = %caller, kyc_verified, "profile created");
        Ok(())
    }

    /// Credit a wallet with externally on-ramped funds.
    pub fn deposit_funds(&mut self, wallet: WalletId, asset: AssetKind, amount: u64) {
        self.balances.credit(wallet, asset, amount);
    }

    // =====================================================================
    // Order lifecycle (non-custodial transitions)
    // =====================================================================

    /// Create a new `Open` order and provision its (empty) escrow account.
    pub fn create_order(
        &mut self,
        caller: WalletId,
        order_id: OrderId,
        amount: u64,
        amount_fiat: u64,
        asset: AssetKind,
        payment_method: PaymentMethod,
        fiat_reference: impl Into<String>,
    ) -> Result<()> {
        self.require_active_platform()?;
        self.require_kyc(caller)?;

        if order_id.is_empty() || order_id.len() > constants::MAX_ORDER_ID_LEN {
            return Err(CambioError::InvalidOrder {
                reason: format!(
                    "order id must be 1..={} characters",
                    constants::MAX_ORDER_ID_LEN
                ),
            });
        }
        if amount == 0 {
            return Err(CambioError::InvalidOrder {
                reason: "amount must be positive".to_string(),
            });
        }
        if amount_fiat == 0 {
            return Err(CambioError::InvalidOrder {
                reason: "fiat amount must be positive".to_string(),
            });
        }
        if amount_fiat > constants::MAX_ORDER_FIAT {
            return Err(CambioError::ExceedsLimit {
                amount_fiat,
                max: constants::MAX_ORDER_FIAT,
            });
        }
        if self.orders.contains_key(&order_id) {
            return Err(CambioError::DuplicateOrder(order_id));
        }

        let order = Order::open(
            order_id.clone(),
            caller,
            amount,
            amount_fiat,
            asset,
            payment_method,
            fiat_reference,
        );
        self.vault.provision(order.escrow);
        info!(order = %order_id, seller = %caller, amount, amount_fiat, "order created");
        self.orders.insert(order_id, order);
        Ok(())
    }

    /// Buyer commits to an `Open` order. The buyer field is set exactly
    /// once here and never reassigned; a racing second accept sees
    /// `Accepted` and fails `InvalidState`, not `Unauthorized`.
    pub fn accept_order(&mut self, caller: WalletId, order_id: &OrderId) -> Result<()> {
        self.require_active_platform()?;
        self.require_kyc(caller)?;

        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| CambioError::OrderNotFound(order_id.clone()))?;

        expect_status(order, OrderStatus::Open, "Open")?;
        if order.seller == caller {
            return Err(CambioError::Unauthorized {
                reason: "seller cannot accept their own order".to_string(),
            });
        }

        order.buyer = Some(caller);
        order.accepted_at = Some(Utc::now());
        order.advance(OrderStatus::Accepted);
        info!(order = %order_id, buyer = %caller, "order accepted");
        Ok(())
    }

    /// Buyer reports the off-chain fiat transfer as sent.
    pub fn confirm_fiat_payment(
        &mut self,
        caller: WalletId,
        order_id: &OrderId,
        fiat_transaction_id: impl Into<String>,
    ) -> Result<()> {
        self.require_active_platform()?;
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| CambioError::OrderNotFound(order_id.clone()))?;

        expect_status(order, OrderStatus::Funded, "Funded")?;
        if order.buyer != Some(caller) {
            return Err(CambioError::Unauthorized {
                reason: "only the accepted buyer may confirm the fiat payment".to_string(),
            });
        }

        order.fiat_transaction_id = Some(fiat_transaction_id.into());
        order.payment_confirmed_at = Some(Utc::now());
        order.advance(OrderStatus::PaymentConfirmed);
        info!(order = %order_id, "fiat payment reported by buyer");
        Ok(())
    }

    /// Oracle attestation of the fiat leg. Only the designated oracle
    /// identity (the platform authority) may call this, and only while
    /// the order awaits verification.
    ///
    /// Attesting `true` twice is a no-op; attesting `false` after a
    /// `true` fails `AttestationConflict`. A `false` attestation records
    /// nothing; the order stays retryable on the next polling tick, and
    /// a persistently rejected payment is routed to dispute by a human,
    /// never auto-cancelled.
    pub fn update_oracle_status(
        &mut self,
        caller: WalletId,
        order_id: &OrderId,
        confirmed: bool,
    ) -> Result<()> {
        let authority = self.platform()?.authority;
        if caller != authority {
            return Err(CambioError::Unauthorized {
                reason: "only the designated oracle may attest".to_string(),
            });
        }
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| CambioError::OrderNotFound(order_id.clone()))?;

        expect_status(order, OrderStatus::PaymentConfirmed, "PaymentConfirmed")?;

        if confirmed {
            // Idempotent: re-attesting true changes nothing.
            order.oracle_confirmed = true;
            Ok(())
        } else if order.oracle_confirmed {
            Err(CambioError::AttestationConflict(order_id.clone()))
        } else {
            warn!(order = %order_id, "oracle attested fiat payment as unconfirmed; leaving order retryable");
            Ok(())
        }
    }

    // =====================================================================
    // Queries
    // =====================================================================

    pub fn platform(&self) -> Result<&Platform> {
        self.platform
            .as_ref()
            .ok_or(CambioError::PlatformNotInitialized)
    }

    pub(crate) fn platform_mut(&mut self) -> Result<&mut Platform> {
        self.platform
            .as_mut()
            .ok_or(CambioError::PlatformNotInitialized)
    }

    #[must_use]
    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    #[must_use]
    pub fn profile(&self, wallet: WalletId) -> Option<&UserProfile> {
        self.profiles.get(&wallet)
    }

    #[must_use]
    pub fn dispute(&self, order_id: &OrderId) -> Option<&Dispute> {
        self.disputes.get(order_id)
    }

    #[must_use]
    pub fn balance(&self, wallet: WalletId, asset: AssetKind) -> u64 {
        self.balances.balance(wallet, asset)
    }

    #[must_use]
    pub fn escrow_balance(&self, order_id: &OrderId) -> u64 {
        self.orders
            .get(order_id)
            .map_or(0, |order| self.vault.balance(order.escrow))
    }

    #[must_use]
    pub fn receipts(&self) -> &[SettlementReceipt] {
        &self.receipts
    }

    /// Orders awaiting oracle verification: fiat reported by the buyer
    /// but not yet attested. The polling loop works off this set.
    #[must_use]
    pub fn orders_pending_verification(&self) -> Vec<&Order> {
        self.orders
            .values()
            .filter(|o| {
                o.status == OrderStatus::PaymentConfirmed
                    && !o.oracle_confirmed
                    && o.fiat_transaction_id.is_some()
            })
            .collect()
    }

    /// Locate an order by the buyer-reported fiat transaction id,
    /// falling back to the seller's bank reference. Used by the webhook
    /// path, where STP pushes rail-side identifiers. An empty reference
    /// never matches: it is the webhook payload's default, not an
    /// identifier.
    #[must_use]
    pub fn find_order_for_rail_event(
        &self,
        transaction_id: &str,
        reference: &str,
    ) -> Option<&Order> {
        self.orders
            .values()
            .find(|o| o.fiat_transaction_id.as_deref() == Some(transaction_id))
            .or_else(|| {
                if reference.is_empty() {
                    return None;
                }
                self.orders
                    .values()
                    .find(|o| o.fiat_reference == reference)
            })
    }

    // =====================================================================
    // Shared guards
    // =====================================================================

    pub(crate) fn require_active_platform(&self) -> Result<()> {
        if !self.platform()?.is_active {
            return Err(CambioError::PlatformInactive);
        }
        Ok(())
    }

    fn require_kyc(&self, wallet: WalletId) -> Result<()> {
        let profile = self
            .profiles
            .get(&wallet)
            .ok_or(CambioError::ProfileNotFound(wallet))?;
        if !profile.is_active {
            return Err(CambioError::UserInactive(wallet));
        }
        if !profile.kyc_verified {
            return Err(CambioError::KycRequired(wallet));
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Ledger {
    /// Test hook: overwrite an order's custody balance so invariant
    /// detection downstream can be exercised.
    ///
    /// # Panics
    /// Panics if the order does not exist.
    pub fn corrupt_escrow_balance(&mut self, order_id: &OrderId, amount: u64) {
        let order = self
            .orders
            .get(order_id)
            .unwrap_or_else(|| panic!("no order {order_id}"));
        self.vault.set_balance_unchecked(order.escrow, amount);
    }
}

/// The compare-and-swap guard: the transition only proceeds if the order
/// is still in the status the caller read.
pub(crate) fn expect_status(order: &Order, expected: OrderStatus, name: &str) -> Result<()> {
    if order.status != expected {
        return Err(CambioError::InvalidState {
            expected: name.to_string(),
            actual: order.status,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cambio_types::constants::MAX_ORDER_FIAT;

    const AUTHORITY: WalletId = WalletId([0xAA; 32]);
    const TREASURY: WalletId = WalletId([0xBB; 32]);
    const SELLER: WalletId = WalletId([1u8; 32]);
    const BUYER: WalletId = WalletId([2u8; 32]);

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .initialize_platform(AUTHORITY, TREASURY, 50)
            .unwrap();
        ledger.create_user_profile(SELLER, true, None).unwrap();
        ledger.create_user_profile(BUYER, true, None).unwrap();
        ledger
    }

    fn create_default_order(ledger: &mut Ledger) -> OrderId {
        let id = OrderId::from("MX-1");
        ledger
            .create_order(
                SELLER,
                id.clone(),
                500_000_000,
                2_000_000_000,
                AssetKind::Sol,
                PaymentMethod::Stp,
                "STP_REF_1",
            )
            .unwrap();
        id
    }

    #[test]
    fn platform_initializes_once() {
        let mut ledger = ledger();
        let err = ledger
            .initialize_platform(AUTHORITY, TREASURY, 50)
            .unwrap_err();
        assert!(matches!(err, CambioError::PlatformAlreadyInitialized));
    }

    #[test]
    fn fee_rate_above_one_hundred_percent_rejected() {
        let mut ledger = Ledger::new();
        let err = ledger
            .initialize_platform(AUTHORITY, TREASURY, 20_000)
            .unwrap_err();
        assert!(matches!(err, CambioError::Configuration(_)));
        // Nothing was created; a valid rate still succeeds.
        assert!(ledger.platform().is_err());
        ledger
            .initialize_platform(AUTHORITY, TREASURY, 10_000)
            .unwrap();
        assert_eq!(ledger.platform().unwrap().fee_bps, 10_000);
    }

    #[test]
    fn pause_blocks_order_creation() {
        let mut ledger = ledger();
        ledger.set_platform_active(AUTHORITY, false).unwrap();
        let err = ledger
            .create_order(
                SELLER,
                OrderId::from("MX-1"),
                1,
                1,
                AssetKind::Sol,
                PaymentMethod::Stp,
                "ref",
            )
            .unwrap_err();
        assert!(matches!(err, CambioError::PlatformInactive));
    }

    #[test]
    fn only_authority_can_pause() {
        let mut ledger = ledger();
        let err = ledger.set_platform_active(SELLER, false).unwrap_err();
        assert!(matches!(err, CambioError::Unauthorized { .. }));
    }

    #[test]
    fn duplicate_profile_rejected() {
        let mut ledger = ledger();
        let err = ledger.create_user_profile(SELLER, true, None).unwrap_err();
        assert!(matches!(err, CambioError::ProfileAlreadyExists(_)));
    }

    #[test]
    fn create_requires_kyc() {
        let mut ledger = ledger();
        let unverified = WalletId([7u8; 32]);
        ledger.create_user_profile(unverified, false, None).unwrap();
        let err = ledger
            .create_order(
                unverified,
                OrderId::from("MX-1"),
                1,
                1,
                AssetKind::Sol,
                PaymentMethod::Stp,
                "ref",
            )
            .unwrap_err();
        assert!(matches!(err, CambioError::KycRequired(w) if w == unverified));
    }

    #[test]
    fn create_requires_profile() {
        let mut ledger = ledger();
        let stranger = WalletId([8u8; 32]);
        let err = ledger
            .create_order(
                stranger,
                OrderId::from("MX-1"),
                1,
                1,
                AssetKind::Sol,
                PaymentMethod::Stp,
                "ref",
            )
            .unwrap_err();
        assert!(matches!(err, CambioError::ProfileNotFound(_)));
    }

    #[test]
    fn fiat_ceiling_enforced_at_boundary() {
        let mut ledger = ledger();
        // Exactly at the ceiling: allowed.
        ledger
            .create_order(
                SELLER,
                OrderId::from("MX-AT-LIMIT"),
                1,
                MAX_ORDER_FIAT,
                AssetKind::Sol,
                PaymentMethod::Spei,
                "ref",
            )
            .unwrap();
        // One unit above: rejected.
        let err = ledger
            .create_order(
                SELLER,
                OrderId::from("MX-OVER"),
                1,
                MAX_ORDER_FIAT + 1,
                AssetKind::Sol,
                PaymentMethod::Spei,
                "ref",
            )
            .unwrap_err();
        assert!(matches!(err, CambioError::ExceedsLimit { .. }));
        // 10,000 MXN on the 9,000 ceiling: rejected.
        let err = ledger
            .create_order(
                SELLER,
                OrderId::from("MX-10K"),
                1,
                10_000_000_000,
                AssetKind::Sol,
                PaymentMethod::Spei,
                "ref",
            )
            .unwrap_err();
        assert!(matches!(err, CambioError::ExceedsLimit { .. }));
    }

    #[test]
    fn duplicate_order_id_rejected() {
        let mut ledger = ledger();
        let id = create_default_order(&mut ledger);
        let err = ledger
            .create_order(
                SELLER,
                id.clone(),
                1,
                1,
                AssetKind::Sol,
                PaymentMethod::Stp,
                "ref",
            )
            .unwrap_err();
        assert!(matches!(err, CambioError::DuplicateOrder(d) if d == id));
    }

    #[test]
    fn overlong_order_id_rejected() {
        let mut ledger = ledger();
        let err = ledger
            .create_order(
                SELLER,
                OrderId::new("x".repeat(51)),
                1,
                1,
                AssetKind::Sol,
                PaymentMethod::Stp,
                "ref",
            )
            .unwrap_err();
        assert!(matches!(err, CambioError::InvalidOrder { .. }));
    }

    #[test]
    fn seller_cannot_accept_own_order() {
        let mut ledger = ledger();
        let id = create_default_order(&mut ledger);
        let err = ledger.accept_order(SELLER, &id).unwrap_err();
        assert!(matches!(err, CambioError::Unauthorized { .. }));
    }

    #[test]
    fn second_accept_fails_invalid_state_not_unauthorized() {
        let mut ledger = ledger();
        let id = create_default_order(&mut ledger);
        let other = WalletId([3u8; 32]);
        ledger.create_user_profile(other, true, None).unwrap();

        ledger.accept_order(BUYER, &id).unwrap();
        let err = ledger.accept_order(other, &id).unwrap_err();
        assert!(
            matches!(err, CambioError::InvalidState { .. }),
            "racing accept must see InvalidState, got: {err}"
        );
        // The winner keeps the order.
        assert_eq!(ledger.order(&id).unwrap().buyer, Some(BUYER));
    }

    #[test]
    fn accept_sets_buyer_and_bumps_version() {
        let mut ledger = ledger();
        let id = create_default_order(&mut ledger);
        ledger.accept_order(BUYER, &id).unwrap();
        let order = ledger.order(&id).unwrap();
        assert_eq!(order.status, OrderStatus::Accepted);
        assert_eq!(order.buyer, Some(BUYER));
        assert_eq!(order.version, 1);
        assert!(order.accepted_at.is_some());
    }

    #[test]
    fn confirm_fiat_requires_funded() {
        let mut ledger = ledger();
        let id = create_default_order(&mut ledger);
        ledger.accept_order(BUYER, &id).unwrap();
        let err = ledger
            .confirm_fiat_payment(BUYER, &id, "TX1")
            .unwrap_err();
        assert!(matches!(err, CambioError::InvalidState { .. }));
    }

    #[test]
    fn attest_requires_oracle_identity() {
        let mut ledger = ledger();
        let id = create_default_order(&mut ledger);
        ledger.accept_order(BUYER, &id).unwrap();
        ledger.deposit_funds(SELLER, AssetKind::Sol, 500_000_000);
        ledger.deposit_to_escrow(SELLER, &id).unwrap();
        ledger.confirm_fiat_payment(BUYER, &id, "TX1").unwrap();

        let err = ledger.update_oracle_status(BUYER, &id, true).unwrap_err();
        assert!(matches!(err, CambioError::Unauthorized { .. }));
    }

    #[test]
    fn attest_does_not_leak_order_existence_to_strangers() {
        let mut ledger = ledger();
        // Unauthorized callers get the same answer whether or not the
        // order exists.
        let err = ledger
            .update_oracle_status(BUYER, &OrderId::from("MX-GHOST"), true)
            .unwrap_err();
        assert!(matches!(err, CambioError::Unauthorized { .. }));
    }

    #[test]
    fn attest_true_is_idempotent() {
        let mut ledger = ledger();
        let id = create_default_order(&mut ledger);
        ledger.accept_order(BUYER, &id).unwrap();
        ledger.deposit_funds(SELLER, AssetKind::Sol, 500_000_000);
        ledger.deposit_to_escrow(SELLER, &id).unwrap();
        ledger.confirm_fiat_payment(BUYER, &id, "TX1").unwrap();

        ledger.update_oracle_status(AUTHORITY, &id, true).unwrap();
        let version = ledger.order(&id).unwrap().version;
        ledger.update_oracle_status(AUTHORITY, &id, true).unwrap();
        let order = ledger.order(&id).unwrap();
        assert!(order.oracle_confirmed);
        assert_eq!(order.version, version, "re-attesting true must not change state");
    }

    #[test]
    fn attest_false_after_true_conflicts() {
        let mut ledger = ledger();
        let id = create_default_order(&mut ledger);
        ledger.accept_order(BUYER, &id).unwrap();
        ledger.deposit_funds(SELLER, AssetKind::Sol, 500_000_000);
        ledger.deposit_to_escrow(SELLER, &id).unwrap();
        ledger.confirm_fiat_payment(BUYER, &id, "TX1").unwrap();

        ledger.update_oracle_status(AUTHORITY, &id, true).unwrap();
        let err = ledger
            .update_oracle_status(AUTHORITY, &id, false)
            .unwrap_err();
        assert!(matches!(err, CambioError::AttestationConflict(_)));
    }

    #[test]
    fn attest_false_leaves_order_retryable() {
        let mut ledger = ledger();
        let id = create_default_order(&mut ledger);
        ledger.accept_order(BUYER, &id).unwrap();
        ledger.deposit_funds(SELLER, AssetKind::Sol, 500_000_000);
        ledger.deposit_to_escrow(SELLER, &id).unwrap();
        ledger.confirm_fiat_payment(BUYER, &id, "TX1").unwrap();

        ledger.update_oracle_status(AUTHORITY, &id, false).unwrap();
        let order = ledger.order(&id).unwrap();
        assert!(!order.oracle_confirmed);
        assert_eq!(order.status, OrderStatus::PaymentConfirmed);
        assert_eq!(ledger.orders_pending_verification().len(), 1);
    }

    #[test]
    fn pending_verification_excludes_attested_orders() {
        let mut ledger = ledger();
        let id = create_default_order(&mut ledger);
        ledger.accept_order(BUYER, &id).unwrap();
        ledger.deposit_funds(SELLER, AssetKind::Sol, 500_000_000);
        ledger.deposit_to_escrow(SELLER, &id).unwrap();
        assert!(ledger.orders_pending_verification().is_empty());

        ledger.confirm_fiat_payment(BUYER, &id, "TX1").unwrap();
        assert_eq!(ledger.orders_pending_verification().len(), 1);

        ledger.update_oracle_status(AUTHORITY, &id, true).unwrap();
        assert!(ledger.orders_pending_verification().is_empty());
    }

    #[test]
    fn rail_event_lookup_by_tx_then_reference() {
        let mut ledger = ledger();
        let id = create_default_order(&mut ledger);
        ledger.accept_order(BUYER, &id).unwrap();
        ledger.deposit_funds(SELLER, AssetKind::Sol, 500_000_000);
        ledger.deposit_to_escrow(SELLER, &id).unwrap();

        // Before confirmation only the reference matches.
        let by_ref = ledger.find_order_for_rail_event("TX1", "STP_REF_1");
        assert_eq!(by_ref.unwrap().order_id, id);

        ledger.confirm_fiat_payment(BUYER, &id, "TX1").unwrap();
        let by_tx = ledger.find_order_for_rail_event("TX1", "unknown");
        assert_eq!(by_tx.unwrap().order_id, id);

        assert!(ledger.find_order_for_rail_event("TX9", "nope").is_none());
    }

    #[test]
    fn rail_event_with_empty_reference_never_falls_back() {
        let mut ledger = ledger();
        // A seller who left the bank reference blank must not catch
        // every webhook that omits one.
        ledger
            .create_order(
                SELLER,
                OrderId::from("MX-BLANK"),
                1,
                1,
                AssetKind::Sol,
                PaymentMethod::Stp,
                "",
            )
            .unwrap();
        assert!(ledger.find_order_for_rail_event("TX-UNKNOWN", "").is_none());
    }
}
