/// Invalid guard configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("required_bps {0} exceeds 10000")]
    RequiredBpsOutOfRange(u64),
    #[error("risk_threshold must be finite and non-negative, got {0}")]
    InvalidRiskThreshold(f64),
}
