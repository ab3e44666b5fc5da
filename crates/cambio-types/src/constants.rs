//! System-wide constants for the Cambio settlement protocol.

/// Regulatory per-order ceiling: 9,000 MXN in six-decimal fixed point.
pub const MAX_ORDER_FIAT: u64 = 9_000_000_000;

/// Fixed-point decimals for MXN amounts.
pub const FIAT_DECIMALS: u32 = 6;

/// Default platform fee: 50 basis points (0.5%).
pub const DEFAULT_FEE_BPS: u16 = 50;

/// Highest admissible fee rate: 10,000 bps = 100% of the trade. Rates
/// above this would make the fee exceed the escrowed amount.
pub const MAX_FEE_BPS: u16 = 10_000;

/// Maximum length of a caller-chosen order id.
pub const MAX_ORDER_ID_LEN: usize = 50;

/// Maximum length of a dispute reason.
pub const MAX_DISPUTE_REASON_LEN: usize = 500;

/// Maximum length of a dispute evidence pointer.
pub const MAX_EVIDENCE_LEN: usize = 1_000;

/// Seconds after `payment_confirmed_at` at which release no longer
/// requires the oracle identity (liveness escape hatch).
pub const RELEASE_TIMEOUT_SECS: i64 = 86_400;

/// Default oracle polling interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;

/// Default HTTP API listen port for the oracle backend.
pub const DEFAULT_API_PORT: u16 = 3001;

/// Default STP sandbox base URL.
pub const DEFAULT_STP_API_URL: &str = "https://api-sandbox.stpmex.com";

/// API key sentinel that keeps the STP client in simulation mode.
pub const SIMULATED_API_KEY: &str = "SIMULATED_API_KEY";

/// Default webhook shared secret for development.
pub const DEFAULT_WEBHOOK_SECRET: &str = "dev_secret_change_in_production";
