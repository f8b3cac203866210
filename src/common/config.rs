use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::universal::fees::BPS_DENOMINATOR;

/// Admission thresholds for a guard deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Minimum facilitator fee as basis points of the requested amount.
    pub required_bps: u64,
    /// Maximum age of a request at evaluation time, in milliseconds.
    pub max_latency_ms: u64,
    /// Risk scores strictly above this are refused.
    pub risk_threshold: f64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            required_bps: 60,
            max_latency_ms: 1_000,
            risk_threshold: 0.8,
        }
    }
}

/// Optional overrides; anything left out keeps its default.
#[derive(Debug, Default, Deserialize)]
struct GuardConfigOverrides {
    required_bps: Option<u64>,
    max_latency_ms: Option<u64>,
    risk_threshold: Option<f64>,
}

/// Mirrors the TOML layout:
///
/// [guard]
/// required_bps = 60
/// max_latency_ms = 1000
/// risk_threshold = 0.8
#[derive(Debug, Default, Deserialize)]
struct GuardConfigFile {
    #[serde(default)]
    guard: GuardConfigOverrides,
}

impl GuardConfig {
    fn layered(overrides: GuardConfigOverrides) -> Self {
        let defaults = Self::default();
        Self {
            required_bps: overrides.required_bps.unwrap_or(defaults.required_bps),
            max_latency_ms: overrides.max_latency_ms.unwrap_or(defaults.max_latency_ms),
            risk_threshold: overrides.risk_threshold.unwrap_or(defaults.risk_threshold),
        }
    }

    /// Build config from env vars, after loading `.env` if one exists:
    ///
    /// - GUARD_REQUIRED_BPS   (default 60)
    /// - GUARD_MAX_LATENCY_MS (default 1000)
    /// - GUARD_RISK_THRESHOLD (default 0.8)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let overrides = envy::prefixed("GUARD_")
            .from_env::<GuardConfigOverrides>()
            .context("failed to read GUARD_* environment variables")?;
        let cfg = Self::layered(overrides);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a `[guard]` TOML table. Missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let file: GuardConfigFile = toml::from_str(raw).context("failed to parse guard config TOML")?;
        let cfg = Self::layered(file.guard);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read guard config {}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.required_bps > BPS_DENOMINATOR {
            return Err(ConfigError::RequiredBpsOutOfRange(self.required_bps));
        }
        if !self.risk_threshold.is_finite() || self.risk_threshold < 0.0 {
            return Err(ConfigError::InvalidRiskThreshold(self.risk_threshold));
        }
        Ok(())
    }

    pub fn max_latency(&self) -> Duration {
        Duration::from_millis(self.max_latency_ms)
    }
}
