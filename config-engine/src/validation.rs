use crate::error::{ConfigError, Result};
use crate::settings::TriageConfig;

/// Reject settings the service cannot run with
pub fn validate(config: &TriageConfig) -> Result<()> {
    if config.history.recent_limit == 0 {
        return Err(ConfigError::Validation(
            "history.recent_limit must be at least 1".to_string(),
        ));
    }
    
    if config.history.capacity < config.history.recent_limit {
        return Err(ConfigError::Validation(format!(
            "history.capacity ({}) must not be smaller than history.recent_limit ({})",
            config.history.capacity, config.history.recent_limit
        )));
    }
    
    if config.advisory.timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "advisory.timeout_ms must be greater than zero".to_string(),
        ));
    }
    
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&TriageConfig::default()).is_ok());
    }
    
    #[test]
    fn test_zero_recent_limit_rejected() {
        let mut config = TriageConfig::default();
        config.history.recent_limit = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }
    
    #[test]
    fn test_capacity_below_window_rejected() {
        let mut config = TriageConfig::default();
        config.history.capacity = 3;
        config.history.recent_limit = 5;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("history.capacity (3)"));
    }
    
    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = TriageConfig::default();
        config.advisory.timeout_ms = 0;
        assert!(validate(&config).is_err());
    }
}
