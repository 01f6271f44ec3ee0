//! Configuration management infrastructure
//!
//! Layered configuration using figment:
//! - Checked-in `config.json` baseline
//! - Deep-partial JSON overrides from environment variables
//! - Test runner and end-to-end harness shortcuts
//! - Semantic validation with fallback to the baseline

pub mod loader;
pub mod mode;
pub mod overrides;

pub use loader::{ConfigError, ConfigLoader, DEFAULT_CONFIG};
pub use mode::ExecutionMode;
pub use overrides::ConfigOverride;
