use figment::providers::{Format, Json, Serialized};
use figment::Figment;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use super::mode::{test_runner_config, ExecutionMode, APP_CONFIG_VAR};
use super::overrides::ConfigOverride;
use crate::domain::models::{BaseUrl, Config};

/// Checked-in baseline configuration
pub const DEFAULT_CONFIG: &str = include_str!("../../../config.json");

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read baseline configuration {path}: {source}")]
    ReadBaseline {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid baseline configuration: {0}")]
    InvalidBaseline(#[source] Box<figment::Error>),

    #[error("Invalid value in {variable}: {source}")]
    InvalidOverride {
        variable: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to merge configuration overrides: {0}")]
    Merge(#[source] Box<figment::Error>),

    #[error("No configuration injected by the harness (NODEVIEW_APP_CONFIG is not set)")]
    MissingInjected,

    #[error("Invalid configuration injected by the harness: {0}")]
    InvalidInjected(#[source] serde_json::Error),

    #[error("{0} cannot be empty")]
    EmptyField(String),

    #[error("Invalid port in {field}: must be non-zero")]
    InvalidPort { field: String },

    #[error("Hostname in {field} cannot be empty")]
    EmptyHostname { field: String },

    #[error("Invalid scheme in {field}: {scheme}. Must be one of: http, https")]
    InvalidScheme { field: String, scheme: String },
}

#[derive(Debug, Clone)]
enum Baseline {
    Embedded,
    File(PathBuf),
}

/// Configuration loader with mode selection and layered merging
///
/// Precedence in normal mode (lowest to highest):
/// 1. Baseline document (`config.json`, or a file given with
///    [`ConfigLoader::with_baseline_file`])
/// 2. Environment overrides (`NODEVIEW_CONFIG_*`)
///
/// An override that fails to parse or does not match the config shape is
/// discarded as a whole and the baseline is returned unchanged. A
/// well-formed override wins for every key it sets; semantic checks apply to
/// the baseline only.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    baseline: Baseline,
    injected: Option<Config>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader using the embedded `config.json` baseline
    pub const fn new() -> Self {
        Self {
            baseline: Baseline::Embedded,
            injected: None,
        }
    }

    /// Loader using a baseline document on disk
    pub fn with_baseline_file(path: impl AsRef<Path>) -> Self {
        Self {
            baseline: Baseline::File(path.as_ref().to_path_buf()),
            injected: None,
        }
    }

    /// Config handed over in-process by an end-to-end harness.
    ///
    /// Takes precedence over `NODEVIEW_APP_CONFIG` in harness mode.
    #[must_use]
    pub fn with_injected(mut self, config: Config) -> Self {
        self.injected = Some(config);
        self
    }

    /// Load configuration for the mode detected from the environment
    ///
    /// Only a broken baseline is reported as an error.
    pub fn load(&self) -> Result<Config, ConfigError> {
        self.load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigLoader::load`], shared for injection into consumers
    pub fn load_shared(&self) -> Result<Arc<Config>, ConfigError> {
        self.load().map(Arc::new)
    }

    /// Load configuration reading variables through `lookup`
    pub fn load_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, ConfigError> {
        let mode = ExecutionMode::from_lookup(&lookup);
        info!(?mode, "Loading configuration");

        match mode {
            ExecutionMode::TestRunner => Ok(test_runner_config()),
            ExecutionMode::Harness => self.harness_config(&lookup),
            ExecutionMode::Normal => self.layered_config(&lookup),
        }
    }

    /// Baseline configuration without any overrides
    pub fn baseline(&self) -> Result<Config, ConfigError> {
        let document = match &self.baseline {
            Baseline::Embedded => DEFAULT_CONFIG.to_string(),
            Baseline::File(path) => {
                std::fs::read_to_string(path).map_err(|source| ConfigError::ReadBaseline {
                    path: path.clone(),
                    source,
                })?
            }
        };

        let config: Config = Figment::from(Json::string(&document))
            .extract()
            .map_err(|e| ConfigError::InvalidBaseline(Box::new(e)))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn harness_config(
        &self,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Config, ConfigError> {
        if let Some(config) = &self.injected {
            return Ok(config.clone());
        }

        let injected = lookup(APP_CONFIG_VAR)
            .ok_or(ConfigError::MissingInjected)
            .and_then(|raw| serde_json::from_str(&raw).map_err(ConfigError::InvalidInjected));

        match injected {
            Ok(config) => Ok(config),
            Err(err) => {
                error!(
                    error = %err,
                    "Harness did not provide a usable configuration. Using baseline."
                );
                self.baseline()
            }
        }
    }

    fn layered_config(
        &self,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Config, ConfigError> {
        let baseline = self.baseline()?;

        match Self::apply_overrides(&baseline, lookup) {
            Ok(config) => Ok(config),
            Err(err) => {
                error!(
                    error = %err,
                    "Error parsing config from environment variables. Using baseline configuration."
                );
                Ok(baseline)
            }
        }
    }

    fn apply_overrides(
        baseline: &Config,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Config, ConfigError> {
        let overrides = ConfigOverride::from_lookup(lookup)?;
        if overrides.is_empty() {
            debug!("No configuration overrides set");
            return Ok(baseline.clone());
        }

        Self::merge(baseline, &overrides)
    }

    /// Deep-merge overrides onto a baseline
    ///
    /// Objects merge key by key. Arrays (`nodes.pinned`) and the `plugins`
    /// map are replaced wholesale when the override sets them.
    pub fn merge(baseline: &Config, overrides: &ConfigOverride) -> Result<Config, ConfigError> {
        let base = if overrides.plugins.is_some() {
            Config {
                plugins: None,
                ..baseline.clone()
            }
        } else {
            baseline.clone()
        };

        Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(|e| ConfigError::Merge(Box::new(e)))
    }

    /// Semantic checks for a baseline document
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let nodes = &config.nodes;

        if nodes.api_version.is_empty() {
            return Err(ConfigError::EmptyField("nodes.apiVersion".to_string()));
        }

        if nodes.fallback_public_explorer.is_empty() {
            return Err(ConfigError::EmptyField(
                "nodes.fallbackPublicExplorer".to_string(),
            ));
        }

        if config.support_website.is_empty() {
            return Err(ConfigError::EmptyField("supportWebsite".to_string()));
        }

        for (field, port) in [
            ("nodes.defaultHttpdPort", nodes.default_httpd_port),
            ("nodes.defaultLocalHttpdPort", nodes.default_local_httpd_port),
            ("nodes.defaultNodePort", nodes.default_node_port),
        ] {
            if port == 0 {
                return Err(ConfigError::InvalidPort {
                    field: field.to_string(),
                });
            }
        }

        if nodes.default_httpd_hostname.is_empty() {
            return Err(ConfigError::EmptyHostname {
                field: "nodes.defaultHttpdHostname".to_string(),
            });
        }

        validate_scheme("nodes.defaultHttpdScheme", &nodes.default_httpd_scheme)?;
        validate_base_url("fallbackPreferredSeed", &config.fallback_preferred_seed)?;

        for (i, pinned) in nodes.pinned.iter().enumerate() {
            validate_base_url(&format!("nodes.pinned[{i}].baseUrl"), &pinned.base_url)?;
        }

        Ok(())
    }
}

fn validate_base_url(field: &str, base_url: &BaseUrl) -> Result<(), ConfigError> {
    if base_url.hostname.is_empty() {
        return Err(ConfigError::EmptyHostname {
            field: field.to_string(),
        });
    }
    if base_url.port == 0 {
        return Err(ConfigError::InvalidPort {
            field: field.to_string(),
        });
    }
    validate_scheme(field, &base_url.scheme)
}

fn validate_scheme(field: &str, scheme: &str) -> Result<(), ConfigError> {
    if matches!(scheme, "http" | "https") {
        Ok(())
    } else {
        Err(ConfigError::InvalidScheme {
            field: field.to_string(),
            scheme: scheme.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::mode::{HARNESS_VAR, TEST_RUNNER_VAR};
    use crate::infrastructure::config::overrides::{
        NodesOverride, FALLBACK_PREFERRED_SEED_VAR, NODES_VAR, PLUGINS_VAR, SUPPORT_WEBSITE_VAR,
    };
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn baseline() -> Config {
        ConfigLoader::new().baseline().expect("Embedded baseline should be valid")
    }

    #[test]
    fn test_embedded_baseline_is_valid() {
        let config = baseline();
        assert_eq!(config.nodes.api_version, "0.1.0");
        assert_eq!(config.support_website, "https://radicle.zulipchat.com");
        assert!(!config.nodes.pinned.is_empty());
        ConfigLoader::validate(&config).expect("Baseline should validate");
    }

    #[test]
    fn test_no_overrides_returns_baseline() {
        let config = ConfigLoader::new().load_with(env(&[])).unwrap();
        assert_eq!(config, baseline());
    }

    #[test]
    fn test_leaf_override_keeps_siblings() {
        let config = ConfigLoader::new()
            .load_with(env(&[(NODES_VAR, r#"{"apiVersion": "0.2.0"}"#)]))
            .unwrap();

        let base = baseline();
        assert_eq!(config.nodes.api_version, "0.2.0");
        assert_eq!(config.nodes.pinned, base.nodes.pinned);
        assert_eq!(config.nodes.default_httpd_port, base.nodes.default_httpd_port);
        assert_eq!(config.support_website, base.support_website);
    }

    #[test]
    fn test_nested_seed_override() {
        let config = ConfigLoader::new()
            .load_with(env(&[(FALLBACK_PREFERRED_SEED_VAR, r#"{"hostname": "seed.example.com"}"#)]))
            .unwrap();

        assert_eq!(
            config.fallback_preferred_seed,
            BaseUrl::new("seed.example.com", 443, "https")
        );
    }

    #[test]
    fn test_pinned_override_replaces_list() {
        let config = ConfigLoader::new()
            .load_with(env(&[(
                NODES_VAR,
                r#"{"pinned": [{"baseUrl": {"hostname": "seed.example.com", "port": 8443, "scheme": "https"}}]}"#,
            )]))
            .unwrap();

        assert_eq!(config.nodes.pinned.len(), 1);
        assert_eq!(
            config.nodes.pinned[0].base_url,
            BaseUrl::new("seed.example.com", 8443, "https")
        );
    }

    #[test]
    fn test_plugins_override_replaces_map() {
        let config = ConfigLoader::new()
            .load_with(env(&[(PLUGINS_VAR, r#"{"otherPlugin": {"enabled": true}}"#)]))
            .unwrap();

        let plugins = config.plugins.unwrap();
        assert_eq!(plugins.len(), 1);
        assert!(plugins["otherPlugin"].enabled);
    }

    #[test]
    fn test_plugin_missing_enabled_falls_back_to_baseline() {
        let config = ConfigLoader::new()
            .load_with(env(&[
                (SUPPORT_WEBSITE_VAR, "https://support.example.com"),
                (PLUGINS_VAR, r#"{"radiclePlanningBoards": {"origin": "http://localhost:5173"}}"#),
            ]))
            .unwrap();

        assert_eq!(config, baseline());
    }

    #[test]
    fn test_malformed_json_falls_back_to_baseline() {
        let config = ConfigLoader::new()
            .load_with(env(&[(NODES_VAR, "{not json")]))
            .unwrap();
        assert_eq!(config, baseline());
    }

    #[test]
    fn test_well_formed_override_is_not_second_guessed() {
        let config = ConfigLoader::new()
            .load_with(env(&[(
                NODES_VAR,
                r#"{"defaultHttpdScheme": "wss", "defaultNodePort": 0}"#,
            )]))
            .unwrap();

        assert_eq!(config.nodes.default_httpd_scheme, "wss");
        assert_eq!(config.nodes.default_node_port, 0);
        assert_eq!(config.nodes.pinned, baseline().nodes.pinned);
    }

    #[test]
    fn test_wrongly_typed_override_falls_back_to_baseline() {
        let config = ConfigLoader::new()
            .load_with(env(&[(NODES_VAR, r#"{"defaultHttpdPort": "443"}"#)]))
            .unwrap();
        assert_eq!(config, baseline());
    }

    #[test]
    fn test_test_runner_skips_overrides() {
        let config = ConfigLoader::new()
            .load_with(env(&[
                (TEST_RUNNER_VAR, "1"),
                (NODES_VAR, r#"{"apiVersion": "9.9.9"}"#),
            ]))
            .unwrap();
        assert_eq!(config, test_runner_config());
    }

    #[test]
    fn test_test_runner_reads_no_override_variables() {
        let vars = env(&[(TEST_RUNNER_VAR, "1"), (NODES_VAR, r#"{"apiVersion": "9.9.9"}"#)]);
        let read = RefCell::new(Vec::new());

        ConfigLoader::new()
            .load_with(|key| {
                read.borrow_mut().push(key.to_string());
                vars(key)
            })
            .unwrap();

        let read = read.into_inner();
        assert_eq!(read, vec![TEST_RUNNER_VAR.to_string()]);
        assert!(!read.iter().any(|key| key.starts_with("NODEVIEW_CONFIG_")));
    }

    #[test]
    fn test_harness_uses_injected_config_without_validation() {
        let mut injected = test_runner_config();
        injected.nodes.default_httpd_scheme = "gopher".to_string();
        injected.fallback_preferred_seed.port = 0;
        assert!(ConfigLoader::validate(&injected).is_err());

        let config = ConfigLoader::new()
            .with_injected(injected.clone())
            .load_with(env(&[(HARNESS_VAR, "1"), (NODES_VAR, r#"{"apiVersion": "9.9.9"}"#)]))
            .unwrap();
        assert_eq!(config, injected);
    }

    #[test]
    fn test_harness_reads_injected_document() {
        let mut injected = test_runner_config();
        injected.support_website = String::new();
        let document = serde_json::to_string(&injected).unwrap();

        let config = ConfigLoader::new()
            .load_with(env(&[(HARNESS_VAR, "1"), (APP_CONFIG_VAR, document.as_str())]))
            .unwrap();
        assert_eq!(config, injected);
    }

    #[test]
    fn test_harness_without_document_uses_baseline() {
        let config = ConfigLoader::new().load_with(env(&[(HARNESS_VAR, "1")])).unwrap();
        assert_eq!(config, baseline());
    }

    #[test]
    fn test_merge_is_idempotent_for_baseline() {
        let base = baseline();
        let overrides: ConfigOverride =
            serde_json::from_value(serde_json::to_value(&base).unwrap()).unwrap();
        assert_eq!(ConfigLoader::merge(&base, &overrides).unwrap(), base);
    }

    #[test]
    fn test_merge_override_wins() {
        let mut base = baseline();
        base.nodes.pinned.clear();
        let overrides = ConfigOverride {
            nodes: Some(NodesOverride {
                api_version: Some("0.2.0".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = ConfigLoader::merge(&base, &overrides).unwrap();
        assert_eq!(merged.nodes.api_version, "0.2.0");
        assert!(merged.nodes.pinned.is_empty());
    }

    #[test]
    fn test_baseline_file() {
        let mut file = NamedTempFile::new().unwrap();
        let mut config = baseline();
        config.support_website = "https://help.example.com".to_string();
        write!(file, "{}", serde_json::to_string(&config).unwrap()).unwrap();
        file.flush().unwrap();

        let loaded = ConfigLoader::with_baseline_file(file.path())
            .load_with(env(&[]))
            .unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_broken_baseline_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"nodes": {{}}}}"#).unwrap();
        file.flush().unwrap();

        let result = ConfigLoader::with_baseline_file(file.path()).load_with(env(&[]));
        assert!(matches!(result, Err(ConfigError::InvalidBaseline(_))));
    }

    #[test]
    fn test_missing_baseline_file_is_an_error() {
        let result = ConfigLoader::with_baseline_file("/nonexistent/config.json").baseline();
        assert!(matches!(result, Err(ConfigError::ReadBaseline { .. })));
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = baseline();
        config.nodes.default_node_port = 0;
        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidPort { field } => assert_eq!(field, "nodes.defaultNodePort"),
            other => panic!("Expected InvalidPort error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_pinned_entries() {
        let mut config = baseline();
        config.nodes.pinned[0].base_url.hostname = String::new();
        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::EmptyHostname { field } => assert_eq!(field, "nodes.pinned[0].baseUrl"),
            other => panic!("Expected EmptyHostname error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_support_website() {
        let mut config = baseline();
        config.support_website = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyField(_))
        ));
    }
}
