//! Configuration types for the oracle backend.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::constants;

/// Connection settings for the external STP/SPEI verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailConfig {
    /// Base URL of the STP API.
    pub api_url: String,
    /// Bearer key. The sentinel value keeps the client in simulation mode.
    pub api_key: String,
    /// STP company identifier.
    pub company_id: String,
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            api_url: constants::DEFAULT_STP_API_URL.to_string(),
            api_key: constants::SIMULATED_API_KEY.to_string(),
            company_id: "DEMO_COMPANY".to_string(),
        }
    }
}

impl RailConfig {
    /// Whether the client should fabricate verification results instead
    /// of calling the real API.
    #[must_use]
    pub fn is_simulated(&self) -> bool {
        self.api_key == constants::SIMULATED_API_KEY
    }
}

/// Configuration for the oracle verifier service and its HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Address to listen on for the operational HTTP API.
    pub listen_addr: SocketAddr,
    /// Polling interval for the verification loop, in milliseconds.
    pub poll_interval_ms: u64,
    /// Development mode: enables `/dev/simulate-payment`.
    pub dev_mode: bool,
    /// Shared secret checked against the `x-webhook-secret` header.
    pub webhook_secret: String,
    /// Fiat-rail connection settings.
    pub rail: RailConfig,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], constants::DEFAULT_API_PORT)),
            poll_interval_ms: constants::DEFAULT_POLL_INTERVAL_MS,
            dev_mode: true,
            webhook_secret: constants::DEFAULT_WEBHOOK_SECRET.to_string(),
            rail: RailConfig::default(),
        }
    }
}
