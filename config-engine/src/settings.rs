use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level triage service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub history: HistoryConfig,
    pub advisory: AdvisoryConfig,
    pub discriminators: DiscriminatorPolicy,
    pub logging: LoggerConfig,
}

/// Encounter history log bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Oldest entries are evicted beyond this many
    pub capacity: usize,
    /// Size of the "recent patients" replay window
    pub recent_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            recent_limit: 5,
        }
    }
}

/// Advisory assist settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    pub enabled: bool,
    pub timeout_ms: u64,
}

impl AdvisoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_ms: 3000,
        }
    }
}

/// How discriminator input is accepted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscriminatorPolicy {
    /// Reject structured answer sets with unset ids instead of treating them as "no"
    pub require_complete_answers: bool,
    /// Allow chief-complaint keywords when no structured answers were collected
    pub keyword_fallback: bool,
}

impl Default for DiscriminatorPolicy {
    fn default() -> Self {
        Self {
            require_complete_answers: false,
            keyword_fallback: true,
        }
    }
}
