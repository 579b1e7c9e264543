//! Tracing setup for triage encounters with PII redaction
//! 
//! Encounter logs routinely carry chief-complaint text, patient names and
//! SA ID numbers. Everything that is not a coded value goes through
//! [`PiiRedactor`] before it is handed to `tracing`.
//! 
//! # Detected Data Types
//! 
//! - **SA ID numbers**: 8203155017089 → ID[hash] or *********7089
//! - **Phone Numbers**: 082 555 1234, +27 82 555 1234 → PHONE[hash]
//! - **Email Addresses**: user@example.com → u***@e***
//! 
//! # Example
//! 
//! ```rust
//! use logger_redacted::{init_tracing, LoggerConfig, PiiRedactor, RedactionConfig};
//! 
//! init_tracing(&LoggerConfig::default()).ok();
//! 
//! let redactor = PiiRedactor::new(RedactionConfig::default());
//! let complaint = redactor.redact("chest pain, call 082 555 1234");
//! tracing::info!(complaint = %complaint, "encounter opened");
//! ```

pub mod redactor;
pub mod config;

pub use redactor::*;
pub use config::*;

use thiserror::Error;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("global tracing subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`.
pub fn init_tracing(config: &LoggerConfig) -> Result<(), LoggerError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json()
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_level(true)
            )
            .try_init()
    };

    result.map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error() {
        let config = LoggerConfig::default();
        // The first call may already have happened in another test thread.
        let _ = init_tracing(&config);
        assert!(matches!(init_tracing(&config), Err(LoggerError::AlreadyInitialized(_))));
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: LoggerConfig = serde_json::from_str(r#"{"json": true}"#).unwrap();
        assert!(config.json);
        assert!(config.redaction_enabled);
        assert_eq!(config.level, "info");
    }
}
