use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::base_url::BaseUrl;

/// Plugin key for the planning boards project view.
pub const PLANNING_BOARDS_PLUGIN: &str = "radiclePlanningBoards";

/// Process-wide client configuration.
///
/// Produced once at startup by the config loader and shared read-only
/// (usually as `Arc<Config>`) with every consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Node connection defaults and pinned nodes
    pub nodes: NodesConfig,

    /// Where users are sent for help
    pub support_website: String,

    /// Seed used when no preferred seed has been chosen
    pub fallback_preferred_seed: BaseUrl,

    /// Optional plugin toggles, keyed by plugin name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<BTreeMap<String, PluginConfig>>,
}

impl Config {
    /// Whether the named plugin is present and enabled.
    pub fn plugin_enabled(&self, name: &str) -> bool {
        self.plugins
            .as_ref()
            .and_then(|plugins| plugins.get(name))
            .is_some_and(|plugin| plugin.enabled)
    }
}

/// Node connection defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodesConfig {
    /// HTTP API version the client speaks
    pub api_version: String,

    /// Explorer URL template with `$host`, `$rid` and `$path` placeholders
    pub fallback_public_explorer: String,

    /// Port of remote node HTTP daemons
    pub default_httpd_port: u16,

    /// Hostname of the default remote node
    pub default_httpd_hostname: String,

    /// Port of a node HTTP daemon running on this machine
    pub default_local_httpd_port: u16,

    /// Peer-to-peer port of a node
    pub default_node_port: u16,

    /// Scheme of remote node HTTP daemons
    pub default_httpd_scheme: String,

    /// Nodes listed on the home view
    pub pinned: Vec<PinnedNode>,
}

impl NodesConfig {
    /// Base URL of the default remote node.
    pub fn default_base_url(&self) -> BaseUrl {
        BaseUrl::new(
            self.default_httpd_hostname.clone(),
            self.default_httpd_port,
            self.default_httpd_scheme.clone(),
        )
    }

    /// Expand the public explorer template for a repository.
    pub fn explorer_url(&self, host: &str, rid: &str, path: &str) -> String {
        self.fallback_public_explorer
            .replace("$host", host)
            .replace("$rid", rid)
            .replace("$path", path)
    }
}

/// A node pinned to the home view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedNode {
    pub base_url: BaseUrl,
}

/// Plugin toggle.
///
/// Only `enabled` is interpreted; every other field is kept verbatim for the
/// plugin itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    pub enabled: bool,

    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl PluginConfig {
    /// Plugin-specific setting by key.
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }
}
