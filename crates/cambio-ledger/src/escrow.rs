//! Escrow custody vault.
//!
//! One custody account per order, keyed by the deterministic
//! [`EscrowKey`]. The vault only moves funds in response to a transition
//! the ledger has already validated; its own job is the accounting
//! invariant: every drain starts from a balance of exactly
//! `order.amount` and ends at exactly zero. Any mismatch is a fatal
//! [`CambioError::EscrowInvariantViolation`]: it indicates fund leakage
//! or double execution and must never be retried.

use std::collections::HashMap;

use cambio_types::{CambioError, EscrowKey, Order, Result, WalletId, fee::SplitAmounts};

use crate::balances::BalanceBook;

/// Custody accounts for all orders.
#[derive(Debug, Default)]
pub struct EscrowVault {
    accounts: HashMap<EscrowKey, u64>,
}

impl EscrowVault {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    /// Provision an empty custody account at order creation.
    pub fn provision(&mut self, key: EscrowKey) {
        self.accounts.entry(key).or_insert(0);
    }

    /// Current custody balance for an order.
    #[must_use]
    pub fn balance(&self, key: EscrowKey) -> u64 {
        self.accounts.get(&key).copied().unwrap_or(0)
    }

    /// Deposit: debit the seller and place exactly `order.amount` into
    /// custody. The account must be empty beforehand (double-deposit
    /// defense).
    ///
    /// # Errors
    /// - `InsufficientFunds` if the seller can't cover the amount
    /// - `EscrowInvariantViolation` if the account already holds funds
    pub fn fund(&mut self, order: &Order, book: &mut BalanceBook) -> Result<()> {
        let current = self.balance(order.escrow);
        if current != 0 {
            return Err(CambioError::EscrowInvariantViolation {
                reason: format!(
                    "deposit into {} for order {}: expected empty account, found {current}",
                    order.escrow, order.order_id
                ),
            });
        }
        book.debit(order.seller, order.asset, order.amount)?;
        self.accounts.insert(order.escrow, order.amount);
        Ok(())
    }

    /// Normal settlement: `amount - fee` to the buyer, `fee` to the
    /// treasury, custody drained to zero.
    pub fn release(
        &mut self,
        order: &Order,
        buyer: WalletId,
        treasury: WalletId,
        fee: u64,
        book: &mut BalanceBook,
    ) -> Result<()> {
        self.assert_full(order)?;
        let buyer_amount = order.amount - fee;
        book.credit(buyer, order.asset, buyer_amount);
        book.credit(treasury, order.asset, fee);
        self.drain(order)
    }

    /// Full refund of the custody balance to one recipient, no fee.
    pub fn refund(
        &mut self,
        order: &Order,
        recipient: WalletId,
        book: &mut BalanceBook,
    ) -> Result<()> {
        self.assert_full(order)?;
        book.credit(recipient, order.asset, order.amount);
        self.drain(order)
    }

    /// Arbitrated split: seller and buyer shares plus the fee, which
    /// together must account for the full custody balance.
    pub fn split(
        &mut self,
        order: &Order,
        seller: WalletId,
        buyer: WalletId,
        treasury: WalletId,
        split: &SplitAmounts,
        book: &mut BalanceBook,
    ) -> Result<()> {
        self.assert_full(order)?;
        if split.total() != order.amount {
            return Err(CambioError::EscrowInvariantViolation {
                reason: format!(
                    "split of order {} accounts for {} of {} units",
                    order.order_id,
                    split.total(),
                    order.amount
                ),
            });
        }
        book.credit(buyer, order.asset, split.buyer);
        book.credit(seller, order.asset, split.seller);
        book.credit(treasury, order.asset, split.fee);
        self.drain(order)
    }

    /// Test hook: force a custody balance, bypassing the accounting
    /// checks. Exists so invariant-violation handling can be exercised.
    #[cfg(any(test, feature = "test-helpers"))]
    pub fn set_balance_unchecked(&mut self, key: EscrowKey, amount: u64) {
        self.accounts.insert(key, amount);
    }

    /// Pre-drain check: custody must hold exactly the order amount.
    fn assert_full(&self, order: &Order) -> Result<()> {
        let current = self.balance(order.escrow);
        if current != order.amount {
            return Err(CambioError::EscrowInvariantViolation {
                reason: format!(
                    "custody {} for order {} holds {current}, expected {}",
                    order.escrow, order.order_id, order.amount
                ),
            });
        }
        Ok(())
    }

    /// Zero the custody account and verify it ended empty.
    fn drain(&mut self, order: &Order) -> Result<()> {
        self.accounts.insert(order.escrow, 0);
        let after = self.balance(order.escrow);
        if after != 0 {
            return Err(CambioError::EscrowInvariantViolation {
                reason: format!(
                    "custody {} for order {} holds {after} after drain",
                    order.escrow, order.order_id
                ),
            });
        }
        Ok(())
    }
}
