//! Facilitator fee policy: validation, minimum-rate enforcement and the
//! stakeholder split.
//!
//! ## Rounding policy
//! [`split_fee`] floors each share independently (70 / 20 / 10 percent). For
//! totals that are not a multiple of 100 the shares can sum to 1 or 2 units
//! less than the total. That residual is deliberately left unallocated so the
//! split stays reproducible for downstream accounting; redistributing it would
//! be a different policy.

pub mod quote;

pub use quote::{
    authorize_payment, policy_hash, pre_settle_check, price_fee, score_payment, sign_payload, FeeQuote,
    FeeSchedule, PaymentProof, PaymentRequirement, QuoteError, RiskSignal,
};

use crate::universal::models::FeeSplit;

/// 10000 bps = 100%.
pub const BPS_DENOMINATOR: u64 = 10_000;

pub const FACILITATOR_PCT: u64 = 70;
pub const INSURANCE_PCT: u64 = 20;
pub const VALIDATOR_PCT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FeeError {
    #[error("fee must not be negative, got {0}")]
    Negative(i64),
}

/// Rejects negative fees. Does not compare against any required amount.
pub fn validate_fee(fee: i64) -> Result<(), FeeError> {
    if fee < 0 {
        return Err(FeeError::Negative(fee));
    }
    Ok(())
}

/// True iff `paid` covers at least `required_bps` of `amount`.
///
/// Compares `paid * 10000 >= amount * required_bps` in 128-bit so neither
/// side can overflow and no precision is lost to division.
pub fn enforce_minimum_fee(amount: u64, paid: u64, required_bps: u64) -> bool {
    let paid_scaled = paid as u128 * BPS_DENOMINATOR as u128;
    let required_scaled = amount as u128 * required_bps as u128;
    paid_scaled >= required_scaled
}

/// Splits `total` 70/20/10 between facilitator, insurance and validator.
///
/// Shares are floored independently, not carved from a running remainder.
pub fn split_fee(total: u64) -> FeeSplit {
    FeeSplit {
        facilitator: pct_of(total, FACILITATOR_PCT),
        insurance: pct_of(total, INSURANCE_PCT),
        validator: pct_of(total, VALIDATOR_PCT),
    }
}

// floor(total * pct / 100) without overflowing for totals near u64::MAX
fn pct_of(total: u64, pct: u64) -> u64 {
    (total as u128 * pct as u128 / 100) as u64
}

/// Stateless handle over the fee operations, for callers that prefer a value
/// to free functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeePolicy;

impl FeePolicy {
    pub fn validate_fee(&self, fee: i64) -> Result<(), FeeError> {
        validate_fee(fee)
    }

    pub fn enforce_minimum_fee(&self, amount: u64, paid: u64, required_bps: u64) -> bool {
        enforce_minimum_fee(amount, paid, required_bps)
    }

    pub fn split_fee(&self, total: u64) -> FeeSplit {
        split_fee(total)
    }
}
