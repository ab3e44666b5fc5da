//! Error types for the Cambio settlement protocol.
//!
//! All errors use the `CX_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order lifecycle errors
//! - 2xx: Authorization / KYC errors
//! - 3xx: Escrow / balance errors
//! - 4xx: Dispute errors
//! - 5xx: Oracle / platform errors
//! - 6xx: Fiat-rail errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{OrderId, OrderStatus, WalletId};

/// Central error enum for all Cambio operations.
#[derive(Debug, Error)]
pub enum CambioError {
    // =================================================================
    // Order Lifecycle Errors (1xx)
    // =================================================================
    /// The requested order does not exist in the store.
    #[error("CX_ERR_100: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The order failed validation (empty id, zero amount, etc.).
    #[error("CX_ERR_101: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// An order with this ID already exists.
    #[error("CX_ERR_102: Order already exists: {0}")]
    DuplicateOrder(OrderId),

    /// The order is not in a status that permits the requested transition.
    #[error("CX_ERR_103: Invalid order state: expected {expected}, got {actual}")]
    InvalidState {
        expected: String,
        actual: OrderStatus,
    },

    /// The fiat amount exceeds the regulatory per-order ceiling.
    #[error("CX_ERR_104: Amount {amount_fiat} exceeds the {max} MXN-unit order limit")]
    ExceedsLimit { amount_fiat: u64, max: u64 },

    // =================================================================
    // Authorization / KYC Errors (2xx)
    // =================================================================
    /// The caller is not permitted to perform this operation.
    #[error("CX_ERR_200: Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// The caller has not passed KYC verification.
    #[error("CX_ERR_201: KYC verification required for {0}")]
    KycRequired(WalletId),

    /// No profile exists for this wallet.
    #[error("CX_ERR_202: Profile not found for {0}")]
    ProfileNotFound(WalletId),

    /// The user's profile has been deactivated.
    #[error("CX_ERR_203: User {0} is not active")]
    UserInactive(WalletId),

    /// A profile already exists for this wallet.
    #[error("CX_ERR_204: Profile already exists for {0}")]
    ProfileAlreadyExists(WalletId),

    // =================================================================
    // Escrow / Balance Errors (3xx)
    // =================================================================
    /// Not enough available balance to fund the escrow.
    #[error("CX_ERR_300: Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    /// Escrow accounting invariant broken: critical safety alert.
    /// Indicates fund leakage or double-spend; must never be retried.
    #[error("CX_ERR_301: Escrow invariant violation: {reason}")]
    EscrowInvariantViolation { reason: String },

    // =================================================================
    // Dispute Errors (4xx)
    // =================================================================
    /// A dispute is already open for this order.
    #[error("CX_ERR_400: Dispute already open for order {0}")]
    DisputeAlreadyOpen(OrderId),

    /// No dispute exists for this order.
    #[error("CX_ERR_401: Dispute not found for order {0}")]
    DisputeNotFound(OrderId),

    /// The dispute has already been resolved.
    #[error("CX_ERR_402: Dispute already resolved for order {0}")]
    DisputeAlreadyResolved(OrderId),

    // =================================================================
    // Oracle / Platform Errors (5xx)
    // =================================================================
    /// Release was requested before the oracle confirmed the fiat leg.
    #[error("CX_ERR_500: Oracle has not confirmed fiat payment for order {0}")]
    OracleNotConfirmed(OrderId),

    /// A false attestation was submitted for an already-confirmed order.
    #[error("CX_ERR_501: Cannot revoke a confirmed attestation for order {0}")]
    AttestationConflict(OrderId),

    /// The platform singleton is paused.
    #[error("CX_ERR_502: Platform is not active")]
    PlatformInactive,

    /// The platform singleton was already initialized.
    #[error("CX_ERR_503: Platform already initialized")]
    PlatformAlreadyInitialized,

    /// An operation required the platform singleton before initialization.
    #[error("CX_ERR_504: Platform not initialized")]
    PlatformNotInitialized,

    // =================================================================
    // Fiat-Rail Errors (6xx)
    // =================================================================
    /// The STP/SPEI verifier could not be reached or returned garbage.
    /// Retried on the normal polling cadence.
    #[error("CX_ERR_600: Fiat rail unavailable: {reason}")]
    RailUnavailable { reason: String },

    /// A webhook arrived without a valid shared secret.
    #[error("CX_ERR_601: Webhook rejected: missing or invalid secret")]
    WebhookUnauthorized,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("CX_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Configuration error (bad env var, unparseable key, etc.).
    #[error("CX_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error (disk, network).
    #[error("CX_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, CambioError>;

// Conversion from std::io::Error
impl From<std::io::Error> for CambioError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
