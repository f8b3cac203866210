//! Execution admission guard for x402 pay-per-call transactions.
//!
//! A transaction is only executed once it has passed attestation, fee,
//! latency, bridge and risk checks. Every violated policy is reported in the
//! resulting [`AdmissionDecision`], and allowed transactions carry the
//! facilitator / insurance / validator fee split.

pub mod common;
pub mod universal;

pub use common::config::GuardConfig;
pub use universal::guard::AdmissionGuard;
pub use universal::metrics::LossMetrics;
pub use universal::models::{AdmissionDecision, DenialReason, FeeSplit, TransactionRequest};
