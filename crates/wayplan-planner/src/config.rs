//! Planner configuration: retry-tier budgets and RNG seeding.
//!
//! The relaxation schedule and attempt counts are tuning constants; they
//! are exposed here with documented defaults instead of being hard-coded
//! in the retry ladder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_relaxed_attempts() -> u32 {
    3
}
const fn default_relaxation_factor() -> f32 {
    1.5
}
const fn default_random_restarts() -> u32 {
    20
}
const fn default_seed() -> u64 {
    1234
}

// ---------------------------------------------------------------------------
// RetryConfig
// ---------------------------------------------------------------------------

/// Per-waypoint retry budgets for the three attempt tiers.
///
/// Tier 1 is always a single tight attempt at the caller's tolerances.
/// Tier 2 retries `relaxed_attempts` times with both tolerances multiplied
/// by `relaxation_factor^k` (k = 1..=relaxed_attempts), a strictly
/// non-decreasing schedule. Tier 3 retries `random_restarts` times at the
/// original tolerances from uniform-random seeds within joint limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Relaxed-tolerance attempts after the tight attempt fails (default: 3).
    #[serde(default = "default_relaxed_attempts")]
    pub relaxed_attempts: u32,

    /// Multiplicative tolerance growth per relaxed attempt (default: 1.5).
    /// Must be >= 1.0 so the schedule never tightens.
    #[serde(default = "default_relaxation_factor")]
    pub relaxation_factor: f32,

    /// Random-restart attempts after relaxation is exhausted (default: 20).
    #[serde(default = "default_random_restarts")]
    pub random_restarts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            relaxed_attempts: default_relaxed_attempts(),
            relaxation_factor: default_relaxation_factor(),
            random_restarts: default_random_restarts(),
        }
    }
}

impl RetryConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.relaxation_factor.is_finite() || self.relaxation_factor < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "relaxation_factor",
                message: format!("{} (must be finite and >= 1.0)", self.relaxation_factor),
            });
        }
        Ok(())
    }

    /// Total attempt budget per waypoint across all three tiers.
    pub const fn total_attempts(&self) -> u32 {
        1 + self.relaxed_attempts + self.random_restarts
    }
}

// ---------------------------------------------------------------------------
// PlannerConfig
// ---------------------------------------------------------------------------

/// Top-level planner configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Seed for the random-restart generator (default: 1234).
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Retry-tier budgets.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            retry: RetryConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.retry.validate()
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
