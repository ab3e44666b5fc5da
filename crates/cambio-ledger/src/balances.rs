//! Per-(wallet, asset) available balances.
//!
//! The in-process stand-in for the substrate's atomic balance transfer:
//! escrow funding debits the seller here, settlement credits recipients
//! here. Amounts are u64 base units of the asset.

use std::collections::HashMap;

use cambio_types::{AssetKind, CambioError, Result, WalletId};

/// Tracks available balances for every participant.
#[derive(Debug, Default)]
pub struct BalanceBook {
    balances: HashMap<(WalletId, AssetKind), u64>,
}

impl BalanceBook {
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Credit a wallet. Creates the entry if it doesn't exist.
    pub fn credit(&mut self, wallet: WalletId, asset: AssetKind, amount: u64) {
        *self.balances.entry((wallet, asset)).or_insert(0) += amount;
    }

    /// Debit a wallet.
    ///
    /// # Errors
    /// Returns `InsufficientFunds` if the wallet doesn't hold `amount`.
    pub fn debit(&mut self, wallet: WalletId, asset: AssetKind, amount: u64) -> Result<()> {
        let entry = self.balances.get_mut(&(wallet, asset)).ok_or(
            CambioError::InsufficientFunds {
                needed: amount,
                available: 0,
            },
        )?;
        if *entry < amount {
            return Err(CambioError::InsufficientFunds {
                needed: amount,
                available: *entry,
            });
        }
        *entry -= amount;
        Ok(())
    }

    /// Current balance for a (wallet, asset) pair.
    #[must_use]
    pub fn balance(&self, wallet: WalletId, asset: AssetKind) -> u64 {
        self.balances.get(&(wallet, asset)).copied().unwrap_or(0)
    }

    /// Total supply of an asset held across all wallets.
    #[must_use]
    pub fn supply(&self, asset: AssetKind) -> u64 {
        self.balances
            .iter()
            .filter(|((_, a), _)| *a == asset)
            .map(|(_, amount)| amount)
            .sum()
    }
}
