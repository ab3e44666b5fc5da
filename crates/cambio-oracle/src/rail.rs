//! STP payment-rail client.
//!
//! Wraps the STP REST API behind a tiny verification interface. When the
//! API key is the simulation sentinel the client fabricates
//! deterministic results from the transaction id instead of making any
//! network call, which is what every test and local deployment uses.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use cambio_types::{CambioError, RailConfig, Result};

/// Rail-side verdict on a payment, normalized from STP's Spanish status
/// vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RailStatus {
    /// The transfer settled (LIQUIDADA / AUTORIZADA).
    Confirmed,
    /// Still in flight (EN_PROCESO / PENDIENTE); retry later.
    Pending,
    /// The rail rejected or cancelled it (RECHAZADA / CANCELADA).
    Rejected,
}

impl std::fmt::Display for RailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::Pending => write!(f, "PENDING"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Result of asking the rail about one transaction.
#[derive(Debug, Clone)]
pub struct PaymentVerification {
    pub transaction_id: String,
    pub status: RailStatus,
    /// MXN amount as reported by the rail, if it reported one.
    pub amount_mxn: Option<Decimal>,
    /// The rail's own status string, kept for the audit trail.
    pub raw_status: String,
}

/// Payment event pushed by STP to our webhook endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StpWebhookEvent {
    /// STP's tracking id for the transfer.
    pub id: String,
    /// Bank reference (concepto) the seller published on the order.
    #[serde(default)]
    pub referencia: String,
    pub estado: String,
    pub monto: Option<Decimal>,
}

/// What STP returns for `GET /ordenes/ordenPago/{id}`.
#[derive(Debug, Deserialize)]
struct StpOrderResponse {
    estado: String,
    monto: Option<Decimal>,
}

/// Map STP's status vocabulary onto the three-way verdict. Unknown
/// statuses are treated as rejections so they surface quickly.
pub fn map_rail_status(estado: &str) -> RailStatus {
    match estado.to_ascii_uppercase().as_str() {
        "LIQUIDADA" | "AUTORIZADA" => RailStatus::Confirmed,
        "EN_PROCESO" | "PENDIENTE" => RailStatus::Pending,
        _ => RailStatus::Rejected,
    }
}

/// Client for the STP orders API.
#[derive(Debug, Clone)]
pub struct StpClient {
    config: RailConfig,
    http: reqwest::Client,
}

impl StpClient {
    #[must_use]
    pub fn new(config: RailConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn is_simulated(&self) -> bool {
        self.config.is_simulated()
    }

    /// Ask the rail whether `transaction_id` settled.
    pub async fn verify_payment(&self, transaction_id: &str) -> Result<PaymentVerification> {
        if self.is_simulated() {
            return Ok(Self::simulate(transaction_id));
        }
        self.verify_live(transaction_id).await
    }

    /// Deterministic fake: the last character of the transaction id
    /// decides the outcome, so tests can stage any scenario by choosing
    /// the id.
    fn simulate(transaction_id: &str) -> PaymentVerification {
        let (status, raw_status) = match transaction_id.chars().last() {
            Some('0'..='7') => (RailStatus::Confirmed, "LIQUIDADA"),
            Some('8') => (RailStatus::Pending, "EN_PROCESO"),
            _ => (RailStatus::Rejected, "RECHAZADA"),
        };
        debug!(transaction_id, %status, "simulated rail verification");
        PaymentVerification {
            transaction_id: transaction_id.to_string(),
            status,
            amount_mxn: None,
            raw_status: raw_status.to_string(),
        }
    }

    async fn verify_live(&self, transaction_id: &str) -> Result<PaymentVerification> {
        let url = format!(
            "{}/ordenes/ordenPago/{transaction_id}",
            self.config.api_url.trim_end_matches('/')
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .header("X-Company-Id", &self.config.company_id)
            .send()
            .await
            .map_err(|e| CambioError::RailUnavailable {
                reason: format!("request to {url} failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(CambioError::RailUnavailable {
                reason: format!("STP returned {} for {transaction_id}", response.status()),
            });
        }

        let body: StpOrderResponse =
            response
                .json()
                .await
                .map_err(|e| CambioError::RailUnavailable {
                    reason: format!("unparseable STP response for {transaction_id}: {e}"),
                })?;

        Ok(PaymentVerification {
            transaction_id: transaction_id.to_string(),
            status: map_rail_status(&body.estado),
            amount_mxn: body.monto,
            raw_status: body.estado,
        })
    }
}
