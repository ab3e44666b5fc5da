//! Oracle backend binary: boots the ledger, the STP polling loop, and
//! the operational HTTP API.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cambio_ledger::Ledger;
use cambio_oracle::config::{self, OracleIdentity};
use cambio_oracle::http::{AppState, router};
use cambio_oracle::rail::StpClient;
use cambio_oracle::service::OracleService;
use cambio_types::{CambioError, Result, WalletId, constants};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let oracle_config = config::load_from_env()?;
    let identity = OracleIdentity::from_env()?;
    let oracle_wallet = identity.wallet_id();
    let treasury = treasury_from_env(oracle_wallet)?;

    let mut ledger = Ledger::new();
    ledger.initialize_platform(oracle_wallet, treasury, constants::DEFAULT_FEE_BPS)?;
    let ledger = Arc::new(Mutex::new(ledger));

    let service = Arc::new(OracleService::new(
        Arc::clone(&ledger),
        StpClient::new(oracle_config.rail.clone()),
        identity,
        Duration::from_millis(oracle_config.poll_interval_ms),
    ));
    info!(
        oracle = %oracle_wallet,
        treasury = %treasury,
        listen = %oracle_config.listen_addr,
        simulated = service.is_simulated(),
        dev_mode = oracle_config.dev_mode,
        "cambio oracle starting"
    );

    let poller = Arc::clone(&service);
    let poll_task = tokio::spawn(async move { poller.run().await });

    let state = AppState {
        service,
        config: Arc::new(oracle_config.clone()),
        started_at: Utc::now(),
    };
    let listener = tokio::net::TcpListener::bind(oracle_config.listen_addr)
        .await
        .map_err(CambioError::from)?;

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(CambioError::from)?;

    poll_task.abort();
    info!("cambio oracle stopped");
    Ok(())
}

/// Treasury wallet from `TREASURY_WALLET` (64 hex chars); development
/// falls back to the oracle's own wallet.
fn treasury_from_env(oracle_wallet: WalletId) -> Result<WalletId> {
    match std::env::var("TREASURY_WALLET") {
        Ok(raw) => {
            let bytes = hex::decode(raw.trim()).map_err(|e| {
                CambioError::Configuration(format!("TREASURY_WALLET is not valid hex: {e}"))
            })?;
            let key: [u8; 32] = bytes.try_into().map_err(|_| {
                CambioError::Configuration(
                    "TREASURY_WALLET must be exactly 32 bytes of hex".to_string(),
                )
            })?;
            Ok(WalletId::from_pubkey(key))
        }
        Err(_) => {
            warn!("TREASURY_WALLET not set; routing fees to the oracle wallet");
            Ok(oracle_wallet)
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(%err, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    }
}
