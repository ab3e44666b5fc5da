//! The verification service: one polling loop, one shared settlement
//! path.
//!
//! Polling, on-demand verification, and webhooks all funnel into
//! [`OracleService::settle_confirmed`], so the attest-then-release
//! sequence and its failure handling exist exactly once.
//!
//! The rail is never queried while the ledger lock is held: each tick
//! snapshots the pending set, drops the lock, talks to STP, then
//! re-locks to apply results. The ledger re-validates every transition,
//! so anything that changed in between fails closed.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use cambio_ledger::Ledger;
use cambio_types::{CambioError, OrderId, Result, WalletId};

use crate::config::OracleIdentity;
use crate::rail::{PaymentVerification, RailStatus, StpClient, StpWebhookEvent, map_rail_status};

pub struct OracleService {
    ledger: Arc<Mutex<Ledger>>,
    rail: StpClient,
    identity: OracleIdentity,
    poll_interval: Duration,
    /// Orders quarantined after an escrow invariant violation. Never
    /// retried automatically; requires operator intervention.
    halted: StdMutex<HashSet<OrderId>>,
}

impl OracleService {
    #[must_use]
    pub fn new(
        ledger: Arc<Mutex<Ledger>>,
        rail: StpClient,
        identity: OracleIdentity,
        poll_interval: Duration,
    ) -> Self {
        Self {
            ledger,
            rail,
            identity,
            poll_interval,
            halted: StdMutex::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn ledger(&self) -> Arc<Mutex<Ledger>> {
        Arc::clone(&self.ledger)
    }

    /// The identity the ledger accepts for attestation and release.
    #[must_use]
    pub fn oracle_wallet(&self) -> WalletId {
        self.identity.wallet_id()
    }

    #[must_use]
    pub fn is_simulated(&self) -> bool {
        self.rail.is_simulated()
    }

    #[must_use]
    pub fn halted_orders(&self) -> Vec<OrderId> {
        match self.halted.lock() {
            Ok(set) => set.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    /// Run the polling loop until the task is aborted.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!(
            interval_ms = self.poll_interval.as_millis(),
            simulated = self.is_simulated(),
            "oracle polling loop started"
        );
        loop {
            ticker.tick().await;
            self.check_pending_orders().await;
        }
    }

    /// One polling pass over every order awaiting verification.
    pub async fn check_pending_orders(&self) {
        let pending: Vec<(OrderId, String)> = {
            let ledger = self.ledger.lock().await;
            ledger
                .orders_pending_verification()
                .into_iter()
                .filter(|o| !self.is_halted(&o.order_id))
                .filter_map(|o| {
                    o.fiat_transaction_id
                        .clone()
                        .map(|tx| (o.order_id.clone(), tx))
                })
                .collect()
        };
        if pending.is_empty() {
            return;
        }
        debug!(count = pending.len(), "checking orders pending verification");

        for (order_id, transaction_id) in pending {
            if let Err(err) = self.verify_and_settle(&order_id, &transaction_id).await {
                warn!(order = %order_id, %err, "verification pass failed; will retry");
            }
        }
    }

    /// Query the rail for one order and settle it if the payment
    /// cleared. The shared path behind polling, the HTTP API, and
    /// webhooks.
    pub async fn verify_and_settle(
        &self,
        order_id: &OrderId,
        transaction_id: &str,
    ) -> Result<PaymentVerification> {
        let verification = self.rail.verify_payment(transaction_id).await?;
        match verification.status {
            RailStatus::Confirmed => self.settle_confirmed(order_id).await?,
            RailStatus::Pending => {
                debug!(order = %order_id, transaction_id, "payment still in flight");
            }
            RailStatus::Rejected => {
                // No destructive action: the parties resolve a rejected
                // transfer through the dispute path.
                warn!(
                    order = %order_id,
                    transaction_id,
                    raw = %verification.raw_status,
                    "rail rejected the reported payment"
                );
            }
        }
        Ok(verification)
    }

    /// Verify an order by its id, resolving the reported transaction id
    /// from the ledger. Used by `POST /verify-order`.
    pub async fn verify_order(&self, order_id: &OrderId) -> Result<PaymentVerification> {
        let transaction_id = {
            let ledger = self.ledger.lock().await;
            let order = ledger
                .order(order_id)
                .ok_or_else(|| CambioError::OrderNotFound(order_id.clone()))?;
            order
                .fiat_transaction_id
                .clone()
                .ok_or_else(|| CambioError::InvalidOrder {
                    reason: format!("order {order_id} has no reported fiat transaction"),
                })?
        };
        self.verify_and_settle(order_id, &transaction_id).await
    }

    /// Verify a bare transaction id without touching the ledger. Used
    /// by `POST /verify-stp-payment`.
    pub async fn verify_transaction(&self, transaction_id: &str) -> Result<PaymentVerification> {
        self.rail.verify_payment(transaction_id).await
    }

    /// Apply a settlement event pushed by STP. Returns the order the
    /// event matched, if any.
    pub async fn handle_webhook(&self, event: &StpWebhookEvent) -> Result<Option<OrderId>> {
        let matched = {
            let ledger = self.ledger.lock().await;
            ledger
                .find_order_for_rail_event(&event.id, &event.referencia)
                .map(|o| o.order_id.clone())
        };
        let Some(order_id) = matched else {
            warn!(
                transaction_id = %event.id,
                reference = %event.referencia,
                "webhook event matched no order"
            );
            return Ok(None);
        };
        if self.is_halted(&order_id) {
            warn!(order = %order_id, "webhook for quarantined order ignored");
            return Ok(Some(order_id));
        }

        match map_rail_status(&event.estado) {
            RailStatus::Confirmed => self.settle_confirmed(&order_id).await?,
            RailStatus::Pending => {
                debug!(order = %order_id, "webhook reports payment still pending");
            }
            RailStatus::Rejected => {
                warn!(order = %order_id, raw = %event.estado, "webhook reports rejected payment");
            }
        }
        Ok(Some(order_id))
    }

    /// Force a confirmed settlement without consulting the rail.
    /// Exposed only through the dev-mode HTTP endpoint.
    pub async fn simulate_payment(&self, order_id: &OrderId) -> Result<()> {
        warn!(order = %order_id, "simulating a confirmed payment");
        self.settle_confirmed(order_id).await
    }

    /// Attest the fiat leg and release the escrow. An
    /// `EscrowInvariantViolation` quarantines the order and is never
    /// retried; every other error is left to the normal retry cadence.
    async fn settle_confirmed(&self, order_id: &OrderId) -> Result<()> {
        let oracle = self.oracle_wallet();
        let mut ledger = self.ledger.lock().await;

        ledger.update_oracle_status(oracle, order_id, true)?;
        let signature = self.identity.sign_attestation(order_id.as_str(), true);

        match ledger.release_funds(oracle, order_id) {
            Ok(()) => {
                info!(
                    order = %order_id,
                    attestation = %hex::encode(signature.to_bytes()),
                    "payment verified and escrow released"
                );
                Ok(())
            }
            Err(err @ CambioError::EscrowInvariantViolation { .. }) => {
                self.halt(order_id);
                error!(
                    order = %order_id,
                    %err,
                    "escrow invariant violation; order quarantined pending operator review"
                );
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    fn is_halted(&self, order_id: &OrderId) -> bool {
        match self.halted.lock() {
            Ok(set) => set.contains(order_id),
            Err(poisoned) => poisoned.into_inner().contains(order_id),
        }
    }

    fn halt(&self, order_id: &OrderId) {
        match self.halted.lock() {
            Ok(mut set) => {
                set.insert(order_id.clone());
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(order_id.clone());
            }
        }
    }
}

impl std::fmt::Debug for OracleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleService")
            .field("oracle", &self.oracle_wallet())
            .field("simulated", &self.is_simulated())
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}
