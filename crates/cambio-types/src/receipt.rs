//! Settlement receipts for the Cambio audit trail.
//!
//! Every fund-moving settlement (release, refund, split) produces a
//! [`SettlementReceipt`] recording exactly who was credited what, so the
//! conservation property can be audited after the fact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OrderId, ReceiptId, WalletId};

/// Which custody operation produced this receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementKind {
    /// Normal release: buyer credited, fee to treasury.
    Release,
    /// Full escrow back to the seller (cancel or arbitration).
    RefundSeller,
    /// Full escrow to the buyer (arbitration).
    RefundBuyer,
    /// Arbitrated split between both parties plus fee.
    Split,
}

impl std::fmt::Display for SettlementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Release => write!(f, "RELEASE"),
            Self::RefundSeller => write!(f, "REFUND_SELLER"),
            Self::RefundBuyer => write!(f, "REFUND_BUYER"),
            Self::Split => write!(f, "SPLIT"),
        }
    }
}

/// One credited recipient within a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub recipient: WalletId,
    pub amount: u64,
}

/// Append-only audit record of a completed settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub id: ReceiptId,
    pub order_id: OrderId,
    pub kind: SettlementKind,
    /// Every recipient credited by this settlement, fee recipient included.
    pub credits: Vec<Credit>,
    /// Fee portion of the credits (zero for refunds).
    pub fee: u64,
    /// SHA-256 over (order id, kind, credits, fee).
    pub digest: [u8; 32],
    pub settled_at: DateTime<Utc>,
}

impl SettlementReceipt {
    #[must_use]
    pub fn new(order_id: OrderId, kind: SettlementKind, credits: Vec<Credit>, fee: u64) -> Self {
        let digest = Self::digest_of(&order_id, kind, &credits, fee);
        Self {
            id: ReceiptId::new(),
            order_id,
            kind,
            credits,
            fee,
            digest,
            settled_at: Utc::now(),
        }
    }

    /// Total amount moved out of escrow by this settlement.
    #[must_use]
    pub fn total_credited(&self) -> u64 {
        self.credits.iter().map(|c| c.amount).sum()
    }

    fn digest_of(
        order_id: &OrderId,
        kind: SettlementKind,
        credits: &[Credit],
        fee: u64,
    ) -> [u8; 32] {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"cambio:receipt:v1:");
        hasher.update(order_id.as_str().as_bytes());
        hasher.update(format!("{kind}").as_bytes());
        for credit in credits {
            hasher.update(credit.recipient.as_bytes());
            hasher.update(credit.amount.to_le_bytes());
        }
        hasher.update(fee.to_le_bytes());
        hasher.finalize().into()
    }
}
