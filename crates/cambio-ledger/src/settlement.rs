//! Fund-moving transitions: escrow deposit, release, cancellation, and
//! dispute arbitration.
//!
//! Every operation here follows the same shape: re-validate the order's
//! status, check authorization, move funds all-or-nothing through the
//! vault, then record the transition and emit a receipt.

use chrono::Utc;
use tracing::info;

use cambio_types::{
    CambioError, Credit, Dispute, DisputeResolution, DisputeStatus, OrderId, OrderStatus,
    Result, SettlementKind, SettlementReceipt, WalletId, constants, fee,
};

use crate::ledger::{Ledger, expect_status};

impl Ledger {
    // =====================================================================
    // Escrow deposit
    // =====================================================================

    /// Seller moves exactly `order.amount` into custody. `Accepted →
    /// Funded`.
    pub fn deposit_to_escrow(&mut self, caller: WalletId, order_id: &OrderId) -> Result<()> {
        self.require_active_platform()?;
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| CambioError::OrderNotFound(order_id.clone()))?;

        expect_status(order, OrderStatus::Accepted, "Accepted")?;
        if order.seller != caller {
            return Err(CambioError::Unauthorized {
                reason: "only the seller may fund the escrow".to_string(),
            });
        }

        self.vault.fund(order, &mut self.balances)?;
        order.funded_at = Some(Utc::now());
        order.advance(OrderStatus::Funded);
        info!(order = %order_id, amount = order.amount, "escrow funded");
        Ok(())
    }

    // =====================================================================
    // Release
    // =====================================================================

    /// Settle a verified order: `amount - fee` to the buyer, `fee` to the
    /// treasury. `PaymentConfirmed → Completed`.
    ///
    /// Callable by the platform authority, or by anyone once 24 hours
    /// have elapsed since the buyer confirmed the fiat payment (liveness
    /// escape hatch for a stalled oracle). The oracle attestation itself
    /// is required on both paths.
    pub fn release_funds(&mut self, caller: WalletId, order_id: &OrderId) -> Result<()> {
        self.require_active_platform()?;
        let platform = self
            .platform
            .as_ref()
            .ok_or(CambioError::PlatformNotInitialized)?;
        let authority = platform.authority;
        let treasury = platform.treasury;
        let fee_bps = platform.fee_bps;

        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| CambioError::OrderNotFound(order_id.clone()))?;

        expect_status(order, OrderStatus::PaymentConfirmed, "PaymentConfirmed")?;

        if caller != authority {
            let confirmed_at = order.payment_confirmed_at.ok_or_else(|| {
                CambioError::Internal(format!(
                    "order {order_id} in PaymentConfirmed without a timestamp"
                ))
            })?;
            let elapsed = Utc::now().signed_duration_since(confirmed_at);
            if elapsed.num_seconds() <= constants::RELEASE_TIMEOUT_SECS {
                return Err(CambioError::Unauthorized {
                    reason: "release requires the platform authority until the timeout elapses"
                        .to_string(),
                });
            }
        }
        if !order.oracle_confirmed {
            return Err(CambioError::OracleNotConfirmed(order_id.clone()));
        }
        let buyer = order.buyer.ok_or_else(|| {
            CambioError::Internal(format!(
                "order {order_id} in PaymentConfirmed without a buyer"
            ))
        })?;

        let fee = fee::platform_fee(order.amount, fee_bps);
        self.vault
            .release(order, buyer, treasury, fee, &mut self.balances)?;

        order.completed_at = Some(Utc::now());
        order.advance(OrderStatus::Completed);
        let seller = order.seller;
        let amount = order.amount;
        let amount_fiat = order.amount_fiat;

        self.record_trade_completed(seller, buyer);
        if let Some(platform) = self.platform.as_mut() {
            platform.record_settlement(amount_fiat);
        }
        self.receipts.push(SettlementReceipt::new(
            order_id.clone(),
            SettlementKind::Release,
            vec![
                Credit {
                    recipient: buyer,
                    amount: amount - fee,
                },
                Credit {
                    recipient: treasury,
                    amount: fee,
                },
            ],
            fee,
        ));
        info!(order = %order_id, amount, fee, "escrow released to buyer");
        Ok(())
    }

    // =====================================================================
    // Cancellation
    // =====================================================================

    /// Seller abandons the order. Before funding the order is simply
    /// voided; from `Funded` the full escrow goes back to the seller with
    /// no fee. `{Open, Accepted, Funded} → Cancelled`.
    pub fn cancel_order(&mut self, caller: WalletId, order_id: &OrderId) -> Result<()> {
        self.require_active_platform()?;
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| CambioError::OrderNotFound(order_id.clone()))?;

        if order.seller != caller {
            return Err(CambioError::Unauthorized {
                reason: "only the seller may cancel".to_string(),
            });
        }

        match order.status {
            OrderStatus::Open | OrderStatus::Accepted => {
                // Nothing in custody yet; the account must still be empty.
                let held = self.vault.balance(order.escrow);
                if held != 0 {
                    return Err(CambioError::EscrowInvariantViolation {
                        reason: format!(
                            "cancel of unfunded order {order_id} found {held} units in custody"
                        ),
                    });
                }
            }
            OrderStatus::Funded => {
                let seller = order.seller;
                self.vault.refund(order, seller, &mut self.balances)?;
                let receipt = SettlementReceipt::new(
                    order_id.clone(),
                    SettlementKind::RefundSeller,
                    vec![Credit {
                        recipient: seller,
                        amount: order.amount,
                    }],
                    0,
                );
                self.receipts.push(receipt);
            }
            _ => {
                return Err(CambioError::InvalidState {
                    expected: "Open, Accepted, or Funded".to_string(),
                    actual: order.status,
                });
            }
        }

        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| CambioError::OrderNotFound(order_id.clone()))?;
        order.advance(OrderStatus::Cancelled);
        info!(order = %order_id, "order cancelled");
        Ok(())
    }

    // =====================================================================
    // Disputes
    // =====================================================================

    /// Either party freezes the order for arbitration. `{Funded,
    /// PaymentConfirmed} → Disputed`.
    pub fn open_dispute(
        &mut self,
        caller: WalletId,
        order_id: &OrderId,
        reason: impl Into<String>,
        evidence_uri: impl Into<String>,
    ) -> Result<()> {
        self.require_active_platform()?;
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| CambioError::OrderNotFound(order_id.clone()))?;

        if !matches!(
            order.status,
            OrderStatus::Funded | OrderStatus::PaymentConfirmed
        ) {
            return Err(CambioError::InvalidState {
                expected: "Funded or PaymentConfirmed".to_string(),
                actual: order.status,
            });
        }
        if !order.is_party(caller) {
            return Err(CambioError::Unauthorized {
                reason: "only the seller or buyer may open a dispute".to_string(),
            });
        }
        if self.disputes.contains_key(order_id) {
            return Err(CambioError::DisputeAlreadyOpen(order_id.clone()));
        }

        let reason = reason.into();
        let evidence_uri = evidence_uri.into();
        if reason.is_empty() || reason.len() > constants::MAX_DISPUTE_REASON_LEN {
            return Err(CambioError::InvalidOrder {
                reason: format!(
                    "dispute reason must be 1..={} characters",
                    constants::MAX_DISPUTE_REASON_LEN
                ),
            });
        }
        if evidence_uri.len() > constants::MAX_EVIDENCE_LEN {
            return Err(CambioError::InvalidOrder {
                reason: format!(
                    "evidence must be at most {} characters",
                    constants::MAX_EVIDENCE_LEN
                ),
            });
        }

        order.advance(OrderStatus::Disputed);
        self.disputes.insert(
            order_id.clone(),
            Dispute::open(order_id.clone(), caller, reason, evidence_uri),
        );
        info!(order = %order_id, initiator = %caller, "dispute opened");
        Ok(())
    }

    /// Fee deducted once, remainder halved; the odd unit goes to the
    /// buyer. `Disputed → Completed`.
    pub fn resolve_dispute_split(
        &mut self,
        caller: WalletId,
        order_id: &OrderId,
        notes: Option<String>,
    ) -> Result<()> {
        self.resolve_dispute(caller, order_id, DisputeResolution::Split, notes)
    }

    /// Full escrow back to the seller, no fee. `Disputed → Refunded`.
    pub fn resolve_dispute_refund_seller(
        &mut self,
        caller: WalletId,
        order_id: &OrderId,
        notes: Option<String>,
    ) -> Result<()> {
        self.resolve_dispute(caller, order_id, DisputeResolution::RefundSeller, notes)
    }

    /// Full escrow to the buyer, no fee. `Disputed → Refunded`.
    pub fn resolve_dispute_refund_buyer(
        &mut self,
        caller: WalletId,
        order_id: &OrderId,
        notes: Option<String>,
    ) -> Result<()> {
        self.resolve_dispute(caller, order_id, DisputeResolution::RefundBuyer, notes)
    }

    fn resolve_dispute(
        &mut self,
        caller: WalletId,
        order_id: &OrderId,
        resolution: DisputeResolution,
        notes: Option<String>,
    ) -> Result<()> {
        self.require_active_platform()?;
        let platform = self
            .platform
            .as_ref()
            .ok_or(CambioError::PlatformNotInitialized)?;
        if platform.authority != caller {
            return Err(CambioError::Unauthorized {
                reason: "only the platform authority may arbitrate".to_string(),
            });
        }
        let treasury = platform.treasury;
        let fee_bps = platform.fee_bps;

        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| CambioError::OrderNotFound(order_id.clone()))?;
        expect_status(order, OrderStatus::Disputed, "Disputed")?;

        let dispute = self
            .disputes
            .get(order_id)
            .ok_or_else(|| CambioError::DisputeNotFound(order_id.clone()))?;
        if dispute.status == DisputeStatus::Resolved {
            return Err(CambioError::DisputeAlreadyResolved(order_id.clone()));
        }

        let seller = order.seller;
        let buyer = order
            .buyer
            .ok_or_else(|| CambioError::Internal(format!("disputed order {order_id} without a buyer")))?;

        let (next_status, kind, credits, fee) = match resolution {
            DisputeResolution::Split => {
                let split = fee::dispute_split(order.amount, fee_bps);
                self.vault
                    .split(order, seller, buyer, treasury, &split, &mut self.balances)?;
                (
                    OrderStatus::Completed,
                    SettlementKind::Split,
                    vec![
                        Credit {
                            recipient: buyer,
                            amount: split.buyer,
                        },
                        Credit {
                            recipient: seller,
                            amount: split.seller,
                        },
                        Credit {
                            recipient: treasury,
                            amount: split.fee,
                        },
                    ],
                    split.fee,
                )
            }
            DisputeResolution::RefundSeller => {
                self.vault.refund(order, seller, &mut self.balances)?;
                (
                    OrderStatus::Refunded,
                    SettlementKind::RefundSeller,
                    vec![Credit {
                        recipient: seller,
                        amount: order.amount,
                    }],
                    0,
                )
            }
            DisputeResolution::RefundBuyer => {
                self.vault.refund(order, buyer, &mut self.balances)?;
                (
                    OrderStatus::Refunded,
                    SettlementKind::RefundBuyer,
                    vec![Credit {
                        recipient: buyer,
                        amount: order.amount,
                    }],
                    0,
                )
            }
        };

        order.completed_at = Some(Utc::now());
        order.advance(next_status);

        if let Some(dispute) = self.disputes.get_mut(order_id) {
            dispute.resolve(caller, resolution, notes);
        }
        self.record_trade_disputed(seller, buyer);
        self.receipts.push(SettlementReceipt::new(
            order_id.clone(),
            kind,
            credits,
            fee,
        ));
        info!(order = %order_id, %resolution, "dispute resolved");
        Ok(())
    }

    // =====================================================================
    // Profile counters
    // =====================================================================

    fn record_trade_completed(&mut self, seller: WalletId, buyer: WalletId) {
        for wallet in [seller, buyer] {
            if let Some(profile) = self.profiles.get_mut(&wallet) {
                profile.record_completed_trade();
            }
        }
    }

    fn record_trade_disputed(&mut self, seller: WalletId, buyer: WalletId) {
        for wallet in [seller, buyer] {
            if let Some(profile) = self.profiles.get_mut(&wallet) {
                profile.record_disputed_trade();
            }
        }
    }
}
