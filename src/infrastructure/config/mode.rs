use crate::domain::models::{BaseUrl, Config, NodesConfig};

/// Set by the automated test runner
pub const TEST_RUNNER_VAR: &str = "NODEVIEW_TEST_RUNNER";
/// Set by the end-to-end harness
pub const HARNESS_VAR: &str = "NODEVIEW_E2E_HARNESS";
/// JSON config injected by the end-to-end harness
pub const APP_CONFIG_VAR: &str = "NODEVIEW_APP_CONFIG";

/// How the process assembles its configuration, resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Fixed in-process config, the environment is not consulted further
    TestRunner,
    /// Config injected by the harness, used without validation
    Harness,
    /// Baseline plus environment overrides
    Normal,
}

impl ExecutionMode {
    /// Detect the mode from the process environment.
    pub fn detect() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Detect the mode from an arbitrary variable lookup.
    ///
    /// The test runner flag wins over the harness flag.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        if is_set(lookup(TEST_RUNNER_VAR)) {
            Self::TestRunner
        } else if is_set(lookup(HARNESS_VAR)) {
            Self::Harness
        } else {
            Self::Normal
        }
    }
}

fn is_set(value: Option<String>) -> bool {
    value.is_some_and(|v| !matches!(v.trim(), "" | "0" | "false"))
}

/// Minimal config used under the automated test runner.
pub fn test_runner_config() -> Config {
    Config {
        nodes: NodesConfig {
            api_version: "0.1.0".to_string(),
            fallback_public_explorer: "https://app.radicle.xyz/nodes/$host/$rid$path".to_string(),
            default_httpd_port: 8081,
            default_httpd_hostname: "127.0.0.1".to_string(),
            default_local_httpd_port: 8081,
            default_node_port: 8776,
            default_httpd_scheme: "http".to_string(),
            pinned: vec![],
        },
        support_website: "https://radicle.zulipchat.com".to_string(),
        fallback_preferred_seed: BaseUrl::new("seed.radicle.garden", 443, "https"),
        plugins: None,
    }
}
