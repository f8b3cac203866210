/// MEV / fraud risk scoring of a transaction payload.
///
/// Higher is riskier. The scale and the threshold that counts as "too risky"
/// belong to the deployment, not to the guard.
pub trait RiskScorer: Send + Sync {
    fn risk_score(&self, message: &[u8]) -> f64;
}

impl<F> RiskScorer for F
where
    F: Fn(&[u8]) -> f64 + Send + Sync,
{
    fn risk_score(&self, message: &[u8]) -> f64 {
        self(message)
    }
}

/// Scorer that returns the same score for every payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRiskScore(pub f64);

impl RiskScorer for FixedRiskScore {
    fn risk_score(&self, _message: &[u8]) -> f64 {
        self.0
    }
}
