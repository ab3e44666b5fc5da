//! Fee and treasury policy.
//!
//! The single shared fee implementation: release and dispute-split must
//! both go through these functions so accounting can never drift between
//! the two settlement paths.

use serde::{Deserialize, Serialize};

/// Platform fee: `floor(amount * fee_bps / 10_000)`.
///
/// Widened to u128 internally so `amount * fee_bps` cannot overflow for
/// any valid u64 amount.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn platform_fee(amount: u64, fee_bps: u16) -> u64 {
    ((u128::from(amount) * u128::from(fee_bps)) / 10_000) as u64
}

/// Exact three-way division of a disputed escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitAmounts {
    pub seller: u64,
    pub buyer: u64,
    pub fee: u64,
}

impl SplitAmounts {
    /// Sum of all parts; always equals the original escrow amount.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.seller + self.buyer + self.fee
    }
}

/// Dispute split: fee deducted once, remainder halved with floor
/// division. The odd unit goes to the buyer so that
/// `seller + buyer + fee == amount` holds exactly; a unit is never
/// silently dropped.
#[must_use]
pub fn dispute_split(amount: u64, fee_bps: u16) -> SplitAmounts {
    let fee = platform_fee(amount, fee_bps);
    let remaining = amount - fee;
    let seller = remaining / 2;
    let buyer = remaining - seller;
    SplitAmounts { seller, buyer, fee }
}
