use crate::error::Result;
use crate::settings::TriageConfig;
use crate::validation;
use config::{Config, Environment, File};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

const ENV_PREFIX: &str = "TRIAGE";
const ENV_SEPARATOR: &str = "__";

/// Builder that layers defaults, an optional file and the environment
#[derive(Debug, Default)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env_overrides: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Optional settings file; a missing file is not an error
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.file = Some(path.into());
        self
    }
    
    /// Read environment-style overrides from `vars` instead of the process environment
    pub fn with_env_map(mut self, vars: HashMap<String, String>) -> Self {
        self.env_overrides = Some(vars);
        self
    }
    
    pub fn load(self) -> Result<TriageConfig> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&TriageConfig::default())?);
        
        if let Some(path) = &self.file {
            debug!(path = %path.display(), "loading triage configuration file");
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }
        
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(self.env_overrides),
        );
        
        let config: TriageConfig = builder.build()?.try_deserialize()?;
        validation::validate(&config)?;
        
        debug!(
            history_capacity = config.history.capacity,
            recent_limit = config.history.recent_limit,
            advisory_enabled = config.advisory.enabled,
            keyword_fallback = config.discriminators.keyword_fallback,
            "triage configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::fs;
    
    fn temp_path(extension: &str) -> PathBuf {
        std::env::temp_dir().join(format!("triage-config-{}.{}", uuid::Uuid::new_v4(), extension))
    }
    
    #[test]
    fn test_defaults_without_sources() {
        let config = ConfigLoader::new()
            .with_env_map(HashMap::new())
            .load()
            .unwrap();
        assert_eq!(config.history.recent_limit, 5);
        assert_eq!(config.advisory.timeout_ms, 3000);
        assert!(config.discriminators.keyword_fallback);
        assert!(!config.advisory.enabled);
    }
    
    #[test]
    fn test_missing_file_is_tolerated() {
        let config = ConfigLoader::new()
            .with_file(temp_path("yaml"))
            .with_env_map(HashMap::new())
            .load()
            .unwrap();
        assert_eq!(config.history.capacity, 100);
    }
    
    #[test]
    fn test_yaml_file_overrides_defaults() {
        let path = temp_path("yaml");
        let mut file_config = TriageConfig::default();
        file_config.advisory.enabled = true;
        file_config.advisory.timeout_ms = 750;
        fs::write(&path, serde_yaml::to_string(&file_config).unwrap()).unwrap();
        
        let config = ConfigLoader::new()
            .with_file(&path)
            .with_env_map(HashMap::new())
            .load()
            .unwrap();
        fs::remove_file(&path).ok();
        
        assert!(config.advisory.enabled);
        assert_eq!(config.advisory.timeout(), std::time::Duration::from_millis(750));
    }
    
    #[test]
    fn test_environment_overrides_file() {
        let path = temp_path("yaml");
        fs::write(&path, "history:\n  recent_limit: 8\n").unwrap();
        
        let env = HashMap::from([
            ("TRIAGE__HISTORY__RECENT_LIMIT".to_string(), "3".to_string()),
            ("TRIAGE__DISCRIMINATORS__KEYWORD_FALLBACK".to_string(), "false".to_string()),
        ]);
        let config = ConfigLoader::new()
            .with_file(&path)
            .with_env_map(env)
            .load()
            .unwrap();
        fs::remove_file(&path).ok();
        
        assert_eq!(config.history.recent_limit, 3);
        assert!(!config.discriminators.keyword_fallback);
    }
    
    #[test]
    fn test_invalid_settings_rejected_after_merge() {
        let env = HashMap::from([
            ("TRIAGE__ADVISORY__TIMEOUT_MS".to_string(), "0".to_string()),
        ]);
        let err = ConfigLoader::new().with_env_map(env).load().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
