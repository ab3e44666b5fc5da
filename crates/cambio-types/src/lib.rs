//! # cambio-types
//!
//! Shared types, errors, and configuration for the **Cambio** P2P
//! crypto/MXN escrow settlement protocol.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`WalletId`], [`OrderId`], [`EscrowKey`], [`ReceiptId`]
//! - **Order model**: [`Order`], [`OrderStatus`], [`AssetKind`], [`PaymentMethod`]
//! - **Profile model**: [`UserProfile`]
//! - **Platform singleton**: [`Platform`]
//! - **Dispute model**: [`Dispute`], [`DisputeStatus`], [`DisputeResolution`]
//! - **Receipt model**: [`SettlementReceipt`], [`SettlementKind`]
//! - **Fee policy**: [`fee::platform_fee`], [`fee::dispute_split`]
//! - **Configuration**: [`OracleConfig`], [`RailConfig`]
//! - **Errors**: [`CambioError`] with `CX_ERR_` prefix codes
//! - **Constants**: regulatory ceilings and service defaults

pub mod config;
pub mod constants;
pub mod dispute;
pub mod error;
pub mod fee;
pub mod ids;
pub mod order;
pub mod platform;
pub mod profile;
pub mod receipt;

// Re-export all primary types at crate root for ergonomic imports:
//   use cambio_types::{Order, OrderStatus, WalletId, ...};

pub use config::*;
pub use dispute::*;
pub use error::*;
pub use ids::*;
pub use order::*;
pub use platform::*;
pub use profile::*;
pub use receipt::*;

// Constants are accessed via `cambio_types::constants::FOO`
// (not re-exported to avoid name collisions).
