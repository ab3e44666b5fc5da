//! Order types for the Cambio P2P escrow protocol.
//!
//! An order is a seller's offer to exchange crypto for off-chain MXN.
//! The status field is the heart of the protocol: every custody movement
//! is gated on a status transition owned by the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EscrowKey, OrderId, WalletId};

/// The asset the seller is offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum AssetKind {
    Sol,
    Usdc,
    Usdt,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sol => write!(f, "SOL"),
            Self::Usdc => write!(f, "USDC"),
            Self::Usdt => write!(f, "USDT"),
        }
    }
}

/// How the buyer pays the off-chain MXN leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Sistema de Transferencias y Pagos.
    Stp,
    /// Sistema de Pagos Electrónicos Interbancarios.
    Spei,
    /// Cash at a physical point.
    Cash,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stp => write!(f, "STP"),
            Self::Spei => write!(f, "SPEI"),
            Self::Cash => write!(f, "CASH"),
        }
    }
}

/// Lifecycle status of an order.
///
/// ```text
/// Open -> Accepted -> Funded -> PaymentConfirmed -> Completed
///   |        |          |              |
///   +--------+--> Cancelled            |
///            (Funded cancel refunds)   |
///            Funded/PaymentConfirmed --+--> Disputed -> Completed (split)
///                                                    -> Refunded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Created by the seller, waiting for a buyer.
    Open,
    /// A buyer committed to the trade.
    Accepted,
    /// The seller deposited the crypto into escrow.
    Funded,
    /// The buyer reported the fiat transfer as sent.
    PaymentConfirmed,
    /// Either party contested; escrow frozen pending arbitration.
    Disputed,
    /// Funds released (normal settlement or arbitrated split). Terminal.
    Completed,
    /// Voided before or after funding; escrow (if any) returned. Terminal.
    Cancelled,
    /// Full escrow refunded to one party by arbitration. Terminal.
    Refunded,
}

impl OrderStatus {
    /// Whether no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Refunded)
    }

    /// Whether the escrow account is expected to hold the full order
    /// amount in this status.
    #[must_use]
    pub fn is_custodial(&self) -> bool {
        matches!(self, Self::Funded | Self::PaymentConfirmed | Self::Disputed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Accepted => write!(f, "ACCEPTED"),
            Self::Funded => write!(f, "FUNDED"),
            Self::PaymentConfirmed => write!(f, "PAYMENT_CONFIRMED"),
            Self::Disputed => write!(f, "DISPUTED"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Refunded => write!(f, "REFUNDED"),
        }
    }
}

/// One P2P trade: `amount` base units of `asset` against `amount_fiat`
/// six-decimal MXN units, paid off-chain via `payment_method`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub seller: WalletId,
    /// Set exactly once, at acceptance. Never reassigned.
    pub buyer: Option<WalletId>,
    /// Base units of the traded asset (e.g. lamports for SOL).
    pub amount: u64,
    /// Fixed-point MXN with 6 decimals.
    pub amount_fiat: u64,
    pub asset: AssetKind,
    pub payment_method: PaymentMethod,
    /// Seller-supplied bank reference for the fiat leg.
    pub fiat_reference: String,
    /// Set by the buyer when confirming the fiat transfer.
    pub fiat_transaction_id: Option<String>,
    /// Set only through the oracle attestation path.
    pub oracle_confirmed: bool,
    pub status: OrderStatus,
    /// Custody account backing this order.
    pub escrow: EscrowKey,
    /// Optimistic-concurrency token; bumped on every transition.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub funded_at: Option<DateTime<Utc>>,
    pub payment_confirmed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Build a fresh `Open` order with a provisioned (empty) escrow key.
    #[must_use]
    pub fn open(
        order_id: OrderId,
        seller: WalletId,
        amount: u64,
        amount_fiat: u64,
        asset: AssetKind,
        payment_method: PaymentMethod,
        fiat_reference: impl Into<String>,
    ) -> Self {
        let escrow = EscrowKey::for_order(&order_id);
        Self {
            order_id,
            seller,
            buyer: None,
            amount,
            amount_fiat,
            asset,
            payment_method,
            fiat_reference: fiat_reference.into(),
            fiat_transaction_id: None,
            oracle_confirmed: false,
            status: OrderStatus::Open,
            escrow,
            version: 0,
            created_at: Utc::now(),
            accepted_at: None,
            funded_at: None,
            payment_confirmed_at: None,
            completed_at: None,
        }
    }

    /// Whether `wallet` is the seller or the accepted buyer.
    #[must_use]
    pub fn is_party(&self, wallet: WalletId) -> bool {
        self.seller == wallet || self.buyer == Some(wallet)
    }

    /// Move to `next` and bump the version token. The ledger validates
    /// the transition before calling this; `advance` only records it.
    pub fn advance(&mut self, next: OrderStatus) {
        self.status = next;
        self.version += 1;
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    pub fn dummy_open(seller: WalletId) -> Self {
        Self::open(
            OrderId::from("MX-TEST-1"),
            seller,
            500_000_000,
            2_000_000_000,
            AssetKind::Sol,
            PaymentMethod::Stp,
            "STP_REF_TEST",
        )
    }
}
