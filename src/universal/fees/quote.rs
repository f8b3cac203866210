use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::{split_fee, BPS_DENOMINATOR};
use crate::universal::models::FeeSplit;

pub const BASE_FEE_BPS: u64 = 10;
pub const MAX_RISK_FEE_BPS: u64 = 90;
/// Risk premium in bps per unit of risk score.
pub const RISK_FEE_BPS_PER_SCORE: f64 = 50.0;
/// Quotes are valid for five minutes after issue.
pub const QUOTE_TTL_SECS: i64 = 300;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error("invalid facilitator amount")]
    InvalidAmount,
    #[error("invalid facilitator fee")]
    InvalidFee,
    #[error("fee quote {quote_id} expired at {expires_at}")]
    Expired { quote_id: String, expires_at: DateTime<Utc> },
    #[error("quote signing key rejected")]
    InvalidSigningKey,
    #[error("fee quote signature does not match its payload")]
    BadSignature,
}

/// What the resource server asks to be paid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentRequirement {
    pub resource: String,
    pub amount: u64,
    pub asset: String,
    pub network: String,
}

/// Baseline risk assessment of a payment requirement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskSignal {
    pub score: f64,
    pub reason: String,
    pub tags: BTreeMap<String, String>,
}

/// Deterministic baseline score: min(1, amount / 10000 + fee_bps / 10000).
///
/// Larger payments and pricier facilitators both push the score up.
pub fn score_payment(requirement: &PaymentRequirement, facilitator_fee_bps: u64) -> RiskSignal {
    let denom = BPS_DENOMINATOR as f64;
    let score = (requirement.amount as f64 / denom + facilitator_fee_bps as f64 / denom).min(1.0);
    let mut tags = BTreeMap::new();
    tags.insert("network".to_string(), requirement.network.clone());
    RiskSignal {
        score,
        reason: "baseline_fee_and_amount".to_string(),
        tags,
    }
}

/// Base plus risk-priced fee rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub base_fee_bps: u64,
    pub risk_fee_bps: u64,
    pub total_fee_bps: u64,
}

/// Prices the facilitator fee for a risk score.
///
/// risk premium = min(90, floor(score * 50)) bps on top of a 10 bps base.
/// Negative or NaN scores carry no premium.
pub fn price_fee(risk_score: f64) -> FeeSchedule {
    let raw = (risk_score * RISK_FEE_BPS_PER_SCORE).floor();
    let risk_fee_bps = if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        // float -> int casts saturate, so huge scores clamp here as well
        (raw as u64).min(MAX_RISK_FEE_BPS)
    };
    FeeSchedule {
        base_fee_bps: BASE_FEE_BPS,
        risk_fee_bps,
        total_fee_bps: BASE_FEE_BPS + risk_fee_bps,
    }
}

/// SHA-256 hex digest of the policy's canonical JSON form.
///
/// `serde_json::Value` objects are key-sorted, so equal policies hash equally
/// regardless of how they were built.
pub fn policy_hash(policy: &serde_json::Value) -> String {
    let canonical = policy.to_string();
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

/// HMAC-SHA256 hex signature of the payload's canonical JSON form.
pub fn sign_payload(payload: &serde_json::Value, secret: &[u8]) -> Result<String, QuoteError> {
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| QuoteError::InvalidSigningKey)?;
    mac.update(payload.to_string().as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// A signed, time-limited facilitator fee offer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub quote_id: String,
    pub asset: String,
    pub amount: u64,
    pub risk_score: f64,
    pub base_fee_bps: u64,
    pub risk_fee_bps: u64,
    pub total_fee_bps: u64,
    pub expires_at: DateTime<Utc>,
    pub policy_hash: String,
    pub signature: String,
}

impl FeeQuote {
    /// Issues a quote for `requirement`, priced by `risk_score` and valid for
    /// [`QUOTE_TTL_SECS`] from `now`.
    pub fn build(
        requirement: &PaymentRequirement,
        risk_score: f64,
        policy_hash: impl Into<String>,
        signature: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let schedule = price_fee(risk_score);
        let ttl = Duration::seconds(QUOTE_TTL_SECS);
        Self {
            quote_id: Uuid::new_v4().to_string(),
            asset: requirement.asset.clone(),
            amount: requirement.amount,
            risk_score,
            base_fee_bps: schedule.base_fee_bps,
            risk_fee_bps: schedule.risk_fee_bps,
            total_fee_bps: schedule.total_fee_bps,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
            policy_hash: policy_hash.into(),
            signature: signature.into(),
        }
    }

    /// Like [`FeeQuote::build`], signing the quote with HMAC-SHA256 under `secret`.
    pub fn build_signed(
        requirement: &PaymentRequirement,
        risk_score: f64,
        policy_hash: impl Into<String>,
        secret: &[u8],
        now: DateTime<Utc>,
    ) -> Result<Self, QuoteError> {
        let mut quote = Self::build(requirement, risk_score, policy_hash, String::new(), now);
        quote.signature = sign_payload(&quote.signing_payload(), secret)?;
        Ok(quote)
    }

    /// The fields covered by the quote signature. Quote id and signature
    /// itself are excluded.
    pub fn signing_payload(&self) -> serde_json::Value {
        json!({
            "asset": self.asset,
            "amount": self.amount,
            "risk_score": self.risk_score,
            "base_fee_bps": self.base_fee_bps,
            "risk_fee_bps": self.risk_fee_bps,
            "total_fee_bps": self.total_fee_bps,
            "expires_at": self.expires_at.timestamp(),
            "policy_hash": self.policy_hash,
        })
    }

    /// Checks the quote signature against its payload in constant time.
    pub fn verify_signature(&self, secret: &[u8]) -> Result<(), QuoteError> {
        let expected = hex::decode(&self.signature).map_err(|_| QuoteError::BadSignature)?;
        let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| QuoteError::InvalidSigningKey)?;
        mac.update(self.signing_payload().to_string().as_bytes());
        mac.verify_slice(&expected).map_err(|_| QuoteError::BadSignature)
    }

    pub fn schedule(&self) -> FeeSchedule {
        FeeSchedule {
            base_fee_bps: self.base_fee_bps,
            risk_fee_bps: self.risk_fee_bps,
            total_fee_bps: self.total_fee_bps,
        }
    }

    /// Quoted fee in asset units: floor(amount * total_fee_bps / 10000).
    pub fn fee_amount(&self) -> u64 {
        let fee = self.amount as u128 * self.total_fee_bps as u128 / BPS_DENOMINATOR as u128;
        u64::try_from(fee).unwrap_or(u64::MAX)
    }

    /// Stakeholder split of [`FeeQuote::fee_amount`].
    pub fn fee_split(&self) -> FeeSplit {
        split_fee(self.fee_amount())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Checks a quote right before settlement. The first failing check wins.
pub fn pre_settle_check(quote: &FeeQuote, now: DateTime<Utc>) -> Result<(), QuoteError> {
    if quote.amount == 0 {
        return Err(QuoteError::InvalidAmount);
    }
    if quote.total_fee_bps == 0 {
        return Err(QuoteError::InvalidFee);
    }
    if quote.is_expired(now) {
        return Err(QuoteError::Expired {
            quote_id: quote.quote_id.clone(),
            expires_at: quote.expires_at,
        });
    }
    Ok(())
}

/// On-chain evidence that a quoted fee was paid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentProof {
    pub memo: String,
    pub tx_hash: String,
}

/// A payment authorizes a quote when its memo carries the quote id.
pub fn authorize_payment(proof: &PaymentProof, quote: &FeeQuote) -> bool {
    proof.memo == quote.quote_id
}
