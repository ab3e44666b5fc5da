//! Operational HTTP API for the oracle backend.
//!
//! Mirrors the surface the mobile app and the STP webhook integration
//! expect: health/status probes, on-demand verification, the webhook
//! receiver, and a dev-only payment simulator.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tracing::warn;

use cambio_types::{CambioError, OracleConfig, OrderId};

use crate::rail::StpWebhookEvent;
use crate::service::OracleService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OracleService>,
    pub config: Arc<OracleConfig>,
    pub started_at: DateTime<Utc>,
}

/// Build the full route table.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/verify-order", post(verify_order))
        .route("/verify-stp-payment", post(verify_stp_payment))
        .route("/webhook/stp", post(stp_webhook))
        .route("/dev/simulate-payment", post(simulate_payment))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn error_response(err: &CambioError) -> (StatusCode, Json<Value>) {
    let code = match err {
        CambioError::OrderNotFound(_) | CambioError::DisputeNotFound(_) => StatusCode::NOT_FOUND,
        CambioError::InvalidOrder { .. } => StatusCode::BAD_REQUEST,
        CambioError::InvalidState { .. }
        | CambioError::AttestationConflict(_)
        | CambioError::DuplicateOrder(_) => StatusCode::CONFLICT,
        CambioError::Unauthorized { .. } | CambioError::WebhookUnauthorized => {
            StatusCode::UNAUTHORIZED
        }
        CambioError::RailUnavailable { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (code, Json(json!({ "error": err.to_string() })))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let uptime = Utc::now().signed_duration_since(state.started_at);
    Json(json!({
        "status": "ok",
        "uptimeSecs": uptime.num_seconds(),
        "simulated": state.service.is_simulated(),
    }))
}

async fn status(State(state): State<AppState>) -> Json<Value> {
    let ledger = state.service.ledger();
    let ledger = ledger.lock().await;
    let pending: Vec<String> = ledger
        .orders_pending_verification()
        .iter()
        .map(|o| o.order_id.to_string())
        .collect();
    let halted: Vec<String> = state
        .service
        .halted_orders()
        .iter()
        .map(ToString::to_string)
        .collect();
    let platform = ledger.platform().ok().map(|p| {
        json!({
            "active": p.is_active,
            "feeBps": p.fee_bps,
            "totalVolume": p.total_volume,
            "totalTransactions": p.total_transactions,
        })
    });
    Json(json!({
        "oracle": state.service.oracle_wallet().to_string(),
        "simulated": state.service.is_simulated(),
        "pollingIntervalMs": state.config.poll_interval_ms,
        "pendingOrders": pending,
        "haltedOrders": halted,
        "platform": platform,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyOrderRequest {
    order_id: String,
}

async fn verify_order(
    State(state): State<AppState>,
    Json(body): Json<VerifyOrderRequest>,
) -> (StatusCode, Json<Value>) {
    let order_id = OrderId::new(body.order_id);
    match state.service.verify_order(&order_id).await {
        Ok(verification) => (
            StatusCode::OK,
            Json(json!({
                "orderId": order_id.to_string(),
                "transactionId": verification.transaction_id,
                "status": verification.status.to_string(),
                "railStatus": verification.raw_status,
            })),
        ),
        Err(err) => error_response(&err),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyPaymentRequest {
    transaction_id: String,
}

async fn verify_stp_payment(
    State(state): State<AppState>,
    Json(body): Json<VerifyPaymentRequest>,
) -> (StatusCode, Json<Value>) {
    match state.service.verify_transaction(&body.transaction_id).await {
        Ok(verification) => (
            StatusCode::OK,
            Json(json!({
                "transactionId": verification.transaction_id,
                "status": verification.status.to_string(),
                "railStatus": verification.raw_status,
                "amountMxn": verification.amount_mxn.map(|d| d.to_string()),
            })),
        ),
        Err(err) => error_response(&err),
    }
}

async fn stp_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<StpWebhookEvent>,
) -> (StatusCode, Json<Value>) {
    let presented = headers
        .get("x-webhook-secret")
        .and_then(|v| v.to_str().ok());
    if presented != Some(state.config.webhook_secret.as_str()) {
        warn!("webhook rejected: missing or invalid secret");
        return error_response(&CambioError::WebhookUnauthorized);
    }

    match state.service.handle_webhook(&event).await {
        Ok(matched) => (
            StatusCode::OK,
            Json(json!({
                "received": true,
                "matchedOrder": matched.map(|id| id.to_string()),
            })),
        ),
        Err(err) => error_response(&err),
    }
}

async fn simulate_payment(
    State(state): State<AppState>,
    Json(body): Json<VerifyOrderRequest>,
) -> (StatusCode, Json<Value>) {
    if !state.config.dev_mode {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "simulate-payment is disabled outside development" })),
        );
    }
    let order_id = OrderId::new(body.order_id);
    match state.service.simulate_payment(&order_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "orderId": order_id.to_string(), "settled": true })),
        ),
        Err(err) => error_response(&err),
    }
}
