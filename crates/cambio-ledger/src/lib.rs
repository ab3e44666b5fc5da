//! # cambio-ledger
//!
//! The authoritative store for the Cambio P2P escrow protocol: the order
//! state machine, escrow custody, user profiles, the platform singleton,
//! and the dispute register.
//!
//! ## Architecture
//!
//! The [`Ledger`] is the single writer. Every state-changing call:
//! 1. Re-validates the order's current status (the compare-and-swap
//!    discipline: a transition that read status `S` only succeeds if the
//!    order is still in `S`)
//! 2. Checks the caller's authorization for the requested transition
//! 3. Moves funds all-or-nothing through the [`EscrowVault`]
//! 4. Records the transition and bumps the order's version token
//!
//! Custody is disjoint per order: no operation touches more than one
//! escrow account, so orders never block each other.
//!
//! ## Fund conservation
//!
//! The [`EscrowVault`] asserts before every drain that the custody
//! balance equals the order amount, and after it that the balance is
//! exactly zero. A mismatch is [`CambioError::EscrowInvariantViolation`]
//! and is never swallowed.
//!
//! [`CambioError::EscrowInvariantViolation`]: cambio_types::CambioError::EscrowInvariantViolation

pub mod balances;
pub mod escrow;
pub mod ledger;
pub mod settlement;

pub use balances::BalanceBook;
pub use escrow::EscrowVault;
pub use ledger::Ledger;
