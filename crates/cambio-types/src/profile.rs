//! Per-wallet reputation and KYC-gate record.
//!
//! Profiles are created lazily by each wallet before its first trade.
//! KYC verification itself happens in an external subsystem; the protocol
//! only consults the boolean gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::WalletId;

/// Reputation and compliance record for one participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub owner: WalletId,
    /// Externally-verified compliance gate. Consulted before every
    /// trade-affecting operation.
    pub kyc_verified: bool,
    /// Opaque reference into the external verifier (e.g. a credential
    /// NFT mint), if one was issued.
    pub kyc_ref: Option<String>,
    pub total_trades: u64,
    pub successful_trades: u64,
    pub disputed_trades: u64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    #[must_use]
    pub fn new(owner: WalletId, kyc_verified: bool, kyc_ref: Option<String>) -> Self {
        Self {
            owner,
            kyc_verified,
            kyc_ref,
            total_trades: 0,
            successful_trades: 0,
            disputed_trades: 0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Record a trade that settled normally.
    pub fn record_completed_trade(&mut self) {
        self.total_trades += 1;
        self.successful_trades += 1;
    }

    /// Record a trade that went through arbitration.
    pub fn record_disputed_trade(&mut self) {
        self.disputed_trades += 1;
    }
}
