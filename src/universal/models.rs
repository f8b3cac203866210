use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A third-party-initiated payment transaction awaiting admission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Payment payload the attestation is bound to.
    pub message: Vec<u8>,
    pub signature: Vec<u8>,
    pub public_key: Vec<u8>,
    /// Amount the caller wants to move, in asset base units.
    pub requested_amount: u64,
    /// Fee actually paid to the facilitator, in asset base units.
    pub paid_fee: u64,
    /// When the request was issued by the caller.
    pub request_timestamp: DateTime<Utc>,
}

impl TransactionRequest {
    pub fn new(
        message: impl Into<Vec<u8>>,
        signature: impl Into<Vec<u8>>,
        public_key: impl Into<Vec<u8>>,
        requested_amount: u64,
        paid_fee: u64,
        request_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            message: message.into(),
            signature: signature.into(),
            public_key: public_key.into(),
            requested_amount,
            paid_fee,
            request_timestamp,
        }
    }

    /// Two's-complement signed view of `paid_fee`.
    ///
    /// Fees above `i64::MAX` come out negative here and are rejected by
    /// fee validation.
    pub fn signed_paid_fee(&self) -> i64 {
        self.paid_fee as i64
    }
}

/// Allocation of a collected fee between the three stakeholders.
///
/// Each share is floored independently, so `facilitator + insurance + validator`
/// may fall short of the total by up to 2 units. See [`crate::universal::fees::split_fee`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeSplit {
    pub facilitator: u64,
    pub insurance: u64,
    pub validator: u64,
}

impl FeeSplit {
    /// Sum of the three allocated shares.
    pub fn allocated(&self) -> u64 {
        // each share is at most 70/20/10 % of a u64, so the sum cannot overflow
        self.facilitator + self.insurance + self.validator
    }

    /// Part of `total` that the split leaves unallocated.
    pub fn residual(&self, total: u64) -> u64 {
        total.saturating_sub(self.allocated())
    }
}

/// Why a transaction was refused. Several reasons can fire for one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    BadAttestation,
    InvalidFee,
    FeeTooLow,
    LatencyExceeded,
    BridgeRejected,
    RiskTooHigh,
}

impl DenialReason {
    /// Stable code used in logs and audit summaries.
    pub fn code(&self) -> &'static str {
        match self {
            DenialReason::BadAttestation => "bad_attestation",
            DenialReason::InvalidFee => "invalid_fee",
            DenialReason::FeeTooLow => "fee_too_low",
            DenialReason::LatencyExceeded => "latency_exceeded",
            DenialReason::BridgeRejected => "bridge_rejected",
            DenialReason::RiskTooHigh => "risk_too_high",
        }
    }

    /// Whether a denial for this reason counts as a prevented loss.
    ///
    /// Malformed attestations and stale requests are not loss events.
    pub fn is_loss_relevant(&self) -> bool {
        matches!(
            self,
            DenialReason::InvalidFee
                | DenialReason::FeeTooLow
                | DenialReason::BridgeRejected
                | DenialReason::RiskTooHigh
        )
    }
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of one admission evaluation.
///
/// `reasons` is empty iff the request is allowed, and `fee_split` is present
/// iff it is allowed. A missing split alone does not say why a request was
/// refused; read `reasons`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionDecision {
    allowed: bool,
    reasons: Vec<DenialReason>,
    fee_split: Option<FeeSplit>,
}

impl AdmissionDecision {
    pub fn allow(fee_split: FeeSplit) -> Self {
        Self {
            allowed: true,
            reasons: Vec::new(),
            fee_split: Some(fee_split),
        }
    }

    /// Builds a denial, or `None` when `reasons` is empty: a request with
    /// nothing against it is not denied.
    pub fn deny(reasons: Vec<DenialReason>) -> Option<Self> {
        if reasons.is_empty() {
            return None;
        }
        Some(Self {
            allowed: false,
            reasons,
            fee_split: None,
        })
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Denial reasons in the order the checks ran.
    pub fn reasons(&self) -> &[DenialReason] {
        &self.reasons
    }

    pub fn fee_split(&self) -> Option<&FeeSplit> {
        self.fee_split.as_ref()
    }

    pub fn has_reason(&self, reason: DenialReason) -> bool {
        self.reasons.contains(&reason)
    }

    pub fn is_loss_relevant(&self) -> bool {
        !self.allowed && self.reasons.iter().any(DenialReason::is_loss_relevant)
    }

    /// `|`-joined reason codes; empty when allowed.
    pub fn reason_summary(&self) -> String {
        self.reasons
            .iter()
            .map(DenialReason::code)
            .collect::<Vec<_>>()
            .join("|")
    }
}
