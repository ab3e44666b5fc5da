//! Dispute register types.
//!
//! At most one dispute per order. Opening a dispute freezes the order in
//! `Disputed`; resolution is authority-arbitrated and drives exactly one
//! custody operation (split or full refund).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OrderId, WalletId};

/// Whether the dispute is still awaiting arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisputeStatus {
    Open,
    Resolved,
}

impl std::fmt::Display for DisputeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Resolved => write!(f, "RESOLVED"),
        }
    }
}

/// The arbitrator's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisputeResolution {
    /// Fee deducted once, remainder divided between seller and buyer.
    Split,
    /// Full escrow back to the seller, no fee.
    RefundSeller,
    /// Full escrow to the buyer, no fee.
    RefundBuyer,
}

impl std::fmt::Display for DisputeResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Split => write!(f, "SPLIT"),
            Self::RefundSeller => write!(f, "REFUND_SELLER"),
            Self::RefundBuyer => write!(f, "REFUND_BUYER"),
        }
    }
}

/// One contested order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dispute {
    pub order_id: OrderId,
    pub initiator: WalletId,
    pub reason: String,
    /// URLs, hashes, or other evidence pointers supplied by the initiator.
    pub evidence_uri: String,
    pub status: DisputeStatus,
    pub resolver: Option<WalletId>,
    pub resolution: Option<DisputeResolution>,
    pub resolution_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Dispute {
    #[must_use]
    pub fn open(
        order_id: OrderId,
        initiator: WalletId,
        reason: impl Into<String>,
        evidence_uri: impl Into<String>,
    ) -> Self {
        Self {
            order_id,
            initiator,
            reason: reason.into(),
            evidence_uri: evidence_uri.into(),
            status: DisputeStatus::Open,
            resolver: None,
            resolution: None,
            resolution_notes: None,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    /// Record the arbitrator's verdict. The ledger performs the matching
    /// custody operation; this only updates the register.
    pub fn resolve(
        &mut self,
        resolver: WalletId,
        resolution: DisputeResolution,
        notes: Option<String>,
    ) {
        self.status = DisputeStatus::Resolved;
        self.resolver = Some(resolver);
        self.resolution = Some(resolution);
        self.resolution_notes = notes;
        self.resolved_at = Some(Utc::now());
    }
}
