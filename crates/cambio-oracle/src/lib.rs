//! # cambio-oracle
//!
//! The fiat-leg verifier for the Cambio escrow protocol. It watches
//! orders whose buyers have reported an STP/SPEI transfer, asks the rail
//! whether the money actually moved, and, on a confirmed payment,
//! attests and releases the escrow through the ledger.
//!
//! Three entry points converge on one verification path:
//! - a polling loop on a fixed cadence,
//! - on-demand verification via the HTTP API,
//! - STP webhooks pushing settlement events.
//!
//! The service holds the platform authority keypair: its wallet id is
//! the only identity the ledger accepts for attestation and release.

pub mod config;
pub mod http;
pub mod rail;
pub mod service;

pub use config::OracleIdentity;
pub use rail::{PaymentVerification, RailStatus, StpClient};
pub use service::OracleService;
