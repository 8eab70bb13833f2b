//! Advisor tuning loaded from an optional TOML file
//!
//! Every section is optional; missing values fall back to defaults.
//!
//! ```toml
//! [retry]
//! max_attempts = 3
//! base_delay_ms = 1000
//! jitter_percent = 0.25
//!
//! [responder]
//! min_latency_ms = 100
//! max_latency_ms = 300
//! simulate_network_error = false
//!
//! [layout]
//! default_panel_percent = 40
//!
//! [recommendations]
//! default_budget = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::RetryOptions;

/// Root advisor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Backoff applied to responder calls
    #[serde(default)]
    pub retry: RetryOptions,

    /// Mock responder behaviour
    #[serde(default)]
    pub responder: ResponderSettings,

    /// Chat/builds split-panel preference
    #[serde(default)]
    pub layout: LayoutSettings,

    #[serde(default)]
    pub recommendations: RecommendationSettings,
}

impl AdvisorConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: AdvisorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.retry.jitter_percent) {
            return Err(ConfigError::Validation(format!(
                "retry.jitter_percent must be between 0 and 1, got {}",
                self.retry.jitter_percent
            )));
        }
        if self.responder.min_latency_ms > self.responder.max_latency_ms {
            return Err(ConfigError::Validation(
                "responder.min_latency_ms must not exceed max_latency_ms".to_string(),
            ));
        }
        Ok(())
    }
}

/// Mock responder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderSettings {
    #[serde(default = "default_min_latency")]
    pub min_latency_ms: u64,

    #[serde(default = "default_max_latency")]
    pub max_latency_ms: u64,

    /// Fail every call with a network error (for testing the retry path)
    #[serde(default)]
    pub simulate_network_error: bool,
}

fn default_min_latency() -> u64 {
    100
}

fn default_max_latency() -> u64 {
    300
}

impl Default for ResponderSettings {
    fn default() -> Self {
        Self {
            min_latency_ms: default_min_latency(),
            max_latency_ms: default_max_latency(),
            simulate_network_error: false,
        }
    }
}

/// Panel split bounds
pub const MIN_PANEL_PERCENT: u8 = 30;
pub const MAX_PANEL_PERCENT: u8 = 70;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_panel_percent")]
    pub default_panel_percent: u8,
}

fn default_panel_percent() -> u8 {
    40
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            default_panel_percent: default_panel_percent(),
        }
    }
}

/// Clamp a panel width percentage into [30, 70]
pub fn clamp_panel_percent(percent: i64) -> u8 {
    percent.clamp(MIN_PANEL_PERCENT as i64, MAX_PANEL_PERCENT as i64) as u8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSettings {
    /// Budget used when a persona is accepted before a budget was given
    #[serde(default = "default_budget")]
    pub default_budget: u64,
}

fn default_budget() -> u64 {
    crate::conversation::flow::DEFAULT_BUDGET
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            default_budget: default_budget(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
