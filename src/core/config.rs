//! Simulation configuration with documented constants
//!
//! Every tunable of the engine lives here with an explanation of what it
//! controls. Values can be overridden from a TOML file; missing keys keep
//! their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SherpaError};

/// Configuration for the simulation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === SCHEDULING ===
    /// Delay before the first tick (milliseconds)
    ///
    /// Gives the dashboard a quiet moment after startup before the feed
    /// starts moving.
    pub initial_delay_ms: u64,

    /// Lower bound of the randomized delay between ticks (milliseconds)
    pub min_interval_ms: u64,

    /// Upper bound of the randomized delay between ticks (milliseconds)
    ///
    /// Each delay is drawn uniformly from `min_interval_ms..max_interval_ms`,
    /// so the cadence is irregular but a tick always follows within
    /// `max_interval_ms`. Equal bounds give a fixed cadence.
    pub max_interval_ms: u64,

    // === HISTORY ===
    /// Maximum number of observations retained in the feed
    ///
    /// The newest observation is at the head; anything past this bound is
    /// evicted oldest-first.
    pub history_limit: usize,

    /// Zone assigned to a synthesized observation when the history is empty
    pub fallback_zone_id: String,

    // === RISK WALK ===
    /// Lowest confidence score the random walk can reach
    pub confidence_floor: u8,

    /// Highest confidence score the random walk can reach
    pub confidence_ceiling: u8,

    /// Maximum absolute confidence perturbation per tick
    ///
    /// At 5.0 a zone's confidence moves by at most five points per tick
    /// before clamping and rounding.
    pub confidence_jitter: f64,

    /// PRNG seed; None seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 5_000,
            min_interval_ms: 10_000,
            max_interval_ms: 15_000,

            history_limit: 30,
            fallback_zone_id: "raven-peak".to_string(),

            confidence_floor: 35,
            confidence_ceiling: 92,
            confidence_jitter: 5.0,

            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Short cadence used by `--fast` runs and demos
    pub fn fast() -> Self {
        Self::default().with_fast_cadence()
    }

    /// Replace only the scheduling fields with the fast cadence
    pub fn with_fast_cadence(self) -> Self {
        Self {
            initial_delay_ms: 500,
            min_interval_ms: 1_000,
            max_interval_ms: 2_000,
            ..self
        }
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Interval bounds, ordered even if the fields are swapped
    pub fn interval_bounds_ms(&self) -> (u64, u64) {
        (
            self.min_interval_ms.min(self.max_interval_ms),
            self.min_interval_ms.max(self.max_interval_ms),
        )
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate().map_err(SherpaError::Config)?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.min_interval_ms > self.max_interval_ms {
            return Err(format!(
                "min_interval_ms ({}) should be <= max_interval_ms ({})",
                self.min_interval_ms, self.max_interval_ms
            ));
        }

        if self.max_interval_ms == 0 {
            return Err("max_interval_ms must be positive".into());
        }

        if self.history_limit == 0 {
            return Err("history_limit must be at least 1".into());
        }

        if self.confidence_floor > self.confidence_ceiling {
            return Err(format!(
                "confidence_floor ({}) should be <= confidence_ceiling ({})",
                self.confidence_floor, self.confidence_ceiling
            ));
        }

        if self.confidence_ceiling > 100 {
            return Err(format!(
                "confidence_ceiling ({}) is above 100",
                self.confidence_ceiling
            ));
        }

        if !self.confidence_jitter.is_finite() || self.confidence_jitter < 0.0 {
            return Err("confidence_jitter must be a non-negative number".into());
        }

        if self.fallback_zone_id.trim().is_empty() {
            return Err("fallback_zone_id must not be empty".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<SimulationConfig> = OnceLock::new();

/// Get the global simulation config (initializes with defaults if not set)
pub fn config() -> &'static SimulationConfig {
    CONFIG.get_or_init(SimulationConfig::default)
}

/// Set the global simulation config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: SimulationConfig) -> std::result::Result<(), SimulationConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history_limit, 30);
        assert_eq!(config.initial_delay(), Duration::from_secs(5));
        assert_eq!(config.interval_bounds_ms(), (10_000, 15_000));
    }

    #[test]
    fn test_fast_config_is_valid() {
        assert!(SimulationConfig::fast().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str("history_limit = 12\nseed = 42\n").unwrap();
        assert_eq!(config.history_limit, 12);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.confidence_floor, 35);
        assert_eq!(config.fallback_zone_id, "raven-peak");
    }

    #[test]
    fn test_toml_rejects_inverted_interval() {
        let err = SimulationConfig::from_toml_str("min_interval_ms = 9000\nmax_interval_ms = 100\n")
            .unwrap_err();
        assert!(matches!(err, SherpaError::Config(_)));
    }

    #[test]
    fn test_toml_syntax_error_is_reported() {
        let err = SimulationConfig::from_toml_str("history_limit = = 3").unwrap_err();
        assert!(matches!(err, SherpaError::TomlError(_)));
    }

    #[test]
    fn test_validate_catches_bad_confidence_bounds() {
        let mut config = SimulationConfig::default();
        config.confidence_floor = 95;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.confidence_ceiling = 120;
        config.confidence_floor = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_history() {
        let mut config = SimulationConfig::default();
        config.history_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fast_cadence_keeps_loaded_settings() {
        let config = SimulationConfig::from_toml_str("history_limit = 12\ninitial_delay_ms = 9000\n")
            .unwrap()
            .with_fast_cadence();
        assert_eq!(config.history_limit, 12);
        assert_eq!(config.initial_delay_ms, 500);
        assert_eq!(config.interval_bounds_ms(), (1_000, 2_000));
    }

    #[test]
    fn test_validate_rejects_non_finite_jitter() {
        let mut config = SimulationConfig::default();
        config.confidence_jitter = f64::NAN;
        assert!(config.validate().is_err());
        config.confidence_jitter = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_interval_bounds_are_ordered() {
        let mut config = SimulationConfig::default();
        config.min_interval_ms = 20;
        config.max_interval_ms = 10;
        assert_eq!(config.interval_bounds_ms(), (10, 20));
    }
}
