//! The platform singleton: process-wide configuration and accumulators.
//!
//! Created exactly once by the admin, then consulted by every custody
//! operation and mutated only at settlement time.

use serde::{Deserialize, Serialize};

use crate::WalletId;

/// Process-wide configuration record. Counters are monotonic
/// accumulators updated under the same serialization discipline as
/// order transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Admin identity; also the designated oracle/arbitrator identity.
    pub authority: WalletId,
    /// Fee-receiving identity.
    pub treasury: WalletId,
    /// Platform fee in basis points (50 = 0.5%).
    pub fee_bps: u16,
    /// Cumulative settled volume, in six-decimal MXN units.
    pub total_volume: u64,
    pub total_transactions: u64,
    /// Kill switch: when false, all trade-affecting operations fail.
    pub is_active: bool,
}

impl Platform {
    #[must_use]
    pub fn new(authority: WalletId, treasury: WalletId, fee_bps: u16) -> Self {
        Self {
            authority,
            treasury,
            fee_bps,
            total_volume: 0,
            total_transactions: 0,
            is_active: true,
        }
    }

    /// Accumulate one settled trade into the platform counters.
    pub fn record_settlement(&mut self, amount_fiat: u64) {
        self.total_volume = self.total_volume.saturating_add(amount_fiat);
        self.total_transactions += 1;
    }
}
