//! Execution admission guard.
//!
//! For each transaction request:
//! 1. Verifies the attestation over the payment message
//! 2. Validates the paid fee
//! 3. Enforces the minimum facilitator fee rate
//! 4. Enforces the latency budget
//! 5. Consults the bridge admission predicate
//! 6. Compares the risk score against the configured threshold
//! 7. Allows the request with a fee split, or denies it with every reason that fired
//! 8. Counts a prevented loss once if any loss-relevant reason fired
//!
//! Every check runs on every call; a decision never stops at the first failure.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::common::config::GuardConfig;
use crate::common::error::ConfigError;
use crate::universal::attestation::{AttestationVerifier, StructuralVerifier};
use crate::universal::bridge::BridgePolicy;
use crate::universal::fees::{enforce_minimum_fee, split_fee, validate_fee};
use crate::universal::latency::within_budget;
use crate::universal::metrics::LossMetrics;
use crate::universal::mev::RiskScorer;
use crate::universal::models::{AdmissionDecision, DenialReason, TransactionRequest};

/// Combines the admission checks into one allow / deny decision.
///
/// Holds no per-call state, so one guard can serve any number of threads.
/// The only shared mutable state is the injected [`LossMetrics`].
pub struct AdmissionGuard {
    verifier: Arc<dyn AttestationVerifier>,
    metrics: Arc<LossMetrics>,
    config: GuardConfig,
}

impl AdmissionGuard {
    /// Guard with the structural placeholder verifier.
    ///
    /// Fails if `config` does not pass [`GuardConfig::validate`].
    pub fn new(config: GuardConfig, metrics: Arc<LossMetrics>) -> Result<Self, ConfigError> {
        Self::with_verifier(config, metrics, Arc::new(StructuralVerifier))
    }

    pub fn with_verifier(
        config: GuardConfig,
        metrics: Arc<LossMetrics>,
        verifier: Arc<dyn AttestationVerifier>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            verifier,
            metrics,
            config,
        })
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<LossMetrics> {
        &self.metrics
    }

    pub fn risk_threshold(&self) -> f64 {
        self.config.risk_threshold
    }

    /// Evaluates `req` against every admission policy.
    ///
    /// Apart from the prevented-loss counter, the result depends only on the
    /// arguments: identical inputs give identical decisions.
    pub fn evaluate(
        &self,
        req: &TransactionRequest,
        required_bps: u64,
        max_latency: Duration,
        now: DateTime<Utc>,
        risk_score: f64,
        bridge_allowed: bool,
    ) -> AdmissionDecision {
        log::debug!(
            "evaluating amount={} fee={} required_bps={} risk_score={} bridge_allowed={}",
            req.requested_amount,
            req.paid_fee,
            required_bps,
            risk_score,
            bridge_allowed
        );
        let mut reasons = Vec::new();

        if let Err(e) = self.verifier.verify(&req.message, &req.signature, &req.public_key) {
            log::debug!("attestation rejected by {} verifier: {}", self.verifier.name(), e);
            reasons.push(DenialReason::BadAttestation);
        }

        if let Err(e) = validate_fee(req.signed_paid_fee()) {
            log::debug!("fee validation failed: {}", e);
            reasons.push(DenialReason::InvalidFee);
        }

        if !enforce_minimum_fee(req.requested_amount, req.paid_fee, required_bps) {
            reasons.push(DenialReason::FeeTooLow);
        }

        if !within_budget(req.request_timestamp, max_latency, now) {
            reasons.push(DenialReason::LatencyExceeded);
        }

        if !bridge_allowed {
            reasons.push(DenialReason::BridgeRejected);
        }

        if risk_score.is_nan() || risk_score > self.config.risk_threshold {
            reasons.push(DenialReason::RiskTooHigh);
        }

        let Some(decision) = AdmissionDecision::deny(reasons) else {
            let split = split_fee(req.paid_fee);
            log::debug!(
                "admitted amount={} fee={} split={:?}",
                req.requested_amount,
                req.paid_fee,
                split
            );
            return AdmissionDecision::allow(split);
        };

        log::warn!(
            "denied amount={} fee={} reasons={}",
            req.requested_amount,
            req.paid_fee,
            decision.reason_summary()
        );
        if decision.is_loss_relevant() {
            self.metrics.increment_prevented_loss();
        }
        decision
    }

    /// Like [`AdmissionGuard::evaluate`], with the fee rate and latency budget
    /// taken from the guard's config.
    pub fn evaluate_with_config(
        &self,
        req: &TransactionRequest,
        now: DateTime<Utc>,
        risk_score: f64,
        bridge_allowed: bool,
    ) -> AdmissionDecision {
        self.evaluate(
            req,
            self.config.required_bps,
            self.config.max_latency(),
            now,
            risk_score,
            bridge_allowed,
        )
    }

    /// Asks the external collaborators for the risk score (over the message)
    /// and the bridge verdict (over the requested amount), then evaluates.
    pub fn evaluate_with(
        &self,
        req: &TransactionRequest,
        required_bps: u64,
        max_latency: Duration,
        now: DateTime<Utc>,
        scorer: &dyn RiskScorer,
        bridge: &dyn BridgePolicy,
    ) -> AdmissionDecision {
        let risk_score = scorer.risk_score(&req.message);
        let bridge_allowed = bridge.allow_transfer(req.requested_amount);
        self.evaluate(req, required_bps, max_latency, now, risk_score, bridge_allowed)
    }
}
