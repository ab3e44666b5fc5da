//! Environment-driven configuration and the oracle signing identity.
//!
//! All knobs come from the same environment variables the deployment
//! scripts already set: `PORT`, `POLLING_INTERVAL_MS`, `NODE_ENV`,
//! `STP_API_URL`, `STP_API_KEY`, `STP_COMPANY_ID`, `WEBHOOK_SECRET`,
//! and `ORACLE_PRIVATE_KEY`.

use std::env;
use std::net::SocketAddr;

use ed25519_dalek::{Signature, Signer, SigningKey};
use rand::rngs::OsRng;
use tracing::warn;

use cambio_types::{CambioError, OracleConfig, RailConfig, Result, WalletId, constants};

/// The oracle's ed25519 keypair. Its public key doubles as the platform
/// authority wallet, the only identity permitted to attest and release.
pub struct OracleIdentity {
    signing_key: SigningKey,
}

impl OracleIdentity {
    /// Load the key from the `ORACLE_PRIVATE_KEY` env var (64 hex chars
    /// of seed), or generate an ephemeral one for development.
    pub fn from_env() -> Result<Self> {
        match env::var("ORACLE_PRIVATE_KEY") {
            Ok(hex_seed) => {
                let bytes = hex::decode(hex_seed.trim()).map_err(|e| {
                    CambioError::Configuration(format!("ORACLE_PRIVATE_KEY is not valid hex: {e}"))
                })?;
                let seed: [u8; 32] = bytes.try_into().map_err(|_| {
                    CambioError::Configuration(
                        "ORACLE_PRIVATE_KEY must be exactly 32 bytes of hex".to_string(),
                    )
                })?;
                Ok(Self {
                    signing_key: SigningKey::from_bytes(&seed),
                })
            }
            Err(_) => {
                warn!("ORACLE_PRIVATE_KEY not set; generating an ephemeral identity");
                Ok(Self {
                    signing_key: SigningKey::generate(&mut OsRng),
                })
            }
        }
    }

    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn ephemeral() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// The wallet id the ledger knows this oracle by.
    #[must_use]
    pub fn wallet_id(&self) -> WalletId {
        WalletId::from_pubkey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign an attestation digest. The signature goes into the audit
    /// log so verifications can be traced back to this key.
    #[must_use]
    pub fn sign_attestation(&self, order_id: &str, confirmed: bool) -> Signature {
        let mut message = Vec::with_capacity(order_id.len() + 20);
        message.extend_from_slice(b"cambio:attest:v1:");
        message.extend_from_slice(order_id.as_bytes());
        message.push(u8::from(confirmed));
        self.signing_key.sign(&message)
    }
}

impl std::fmt::Debug for OracleIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleIdentity")
            .field("wallet_id", &self.wallet_id())
            .finish_non_exhaustive()
    }
}

/// Assemble the service configuration from the environment, falling back
/// to development defaults for anything unset.
pub fn load_from_env() -> Result<OracleConfig> {
    let port = match env::var("PORT") {
        Ok(raw) => raw.parse::<u16>().map_err(|e| {
            CambioError::Configuration(format!("PORT {raw:?} is not a valid port: {e}"))
        })?,
        Err(_) => constants::DEFAULT_API_PORT,
    };
    let poll_interval_ms = match env::var("POLLING_INTERVAL_MS") {
        Ok(raw) => raw.parse::<u64>().map_err(|e| {
            CambioError::Configuration(format!("POLLING_INTERVAL_MS {raw:?} is invalid: {e}"))
        })?,
        Err(_) => constants::DEFAULT_POLL_INTERVAL_MS,
    };
    let dev_mode = env::var("NODE_ENV").map_or(true, |v| v != "production");
    let webhook_secret = env::var("WEBHOOK_SECRET")
        .unwrap_or_else(|_| constants::DEFAULT_WEBHOOK_SECRET.to_string());
    if dev_mode && webhook_secret == constants::DEFAULT_WEBHOOK_SECRET {
        warn!("using the default webhook secret; set WEBHOOK_SECRET before going live");
    }

    let rail = RailConfig {
        api_url: env::var("STP_API_URL")
            .unwrap_or_else(|_| constants::DEFAULT_STP_API_URL.to_string()),
        api_key: env::var("STP_API_KEY")
            .unwrap_or_else(|_| constants::SIMULATED_API_KEY.to_string()),
        company_id: env::var("STP_COMPANY_ID").unwrap_or_else(|_| "DEMO_COMPANY".to_string()),
    };

    Ok(OracleConfig {
        listen_addr: SocketAddr::from(([0, 0, 0, 0], port)),
        poll_interval_ms,
        dev_mode,
        webhook_secret,
        rail,
    })
}
