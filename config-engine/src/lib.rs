//! Configuration management for the triage service
//! 
//! Settings are resolved from three layers, later layers winning:
//! 
//! - **Defaults**: `TriageConfig::default()`
//! - **File**: optional YAML, TOML or JSON file, format picked by extension
//! - **Environment**: `TRIAGE__SECTION__KEY`, e.g. `TRIAGE__ADVISORY__TIMEOUT_MS=1500`
//! 
//! Nothing here influences the scoring tables or priority thresholds. Those
//! are fixed by the clinical manual the engine implements and are not
//! configurable.
//! 
//! # Example
//! 
//! ```rust,no_run
//! use config_engine::ConfigLoader;
//! 
//! let config = ConfigLoader::new()
//!     .with_file("triage.yaml")
//!     .load()
//!     .expect("valid configuration");
//! 
//! assert!(config.history.recent_limit > 0);
//! ```

pub mod engine;
pub mod settings;
pub mod validation;
pub mod error;

pub use engine::*;
pub use settings::*;
pub use error::*;
