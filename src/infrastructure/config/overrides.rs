//! Deep-partial configuration overrides.
//!
//! Every field is optional at every nesting level so a single leaf can be
//! overridden without repeating its siblings. Two things are not partial:
//! `pinned` entries must be complete, and each plugin entry must carry
//! `enabled`. Unknown keys are ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::loader::ConfigError;
use crate::domain::models::{PinnedNode, PluginConfig};

/// JSON object overriding `nodes`
pub const NODES_VAR: &str = "NODEVIEW_CONFIG_NODES";
/// Plain string overriding `supportWebsite`
pub const SUPPORT_WEBSITE_VAR: &str = "NODEVIEW_CONFIG_SUPPORT_WEBSITE";
/// JSON object overriding `fallbackPreferredSeed`
pub const FALLBACK_PREFERRED_SEED_VAR: &str = "NODEVIEW_CONFIG_FALLBACK_PREFERRED_SEED";
/// JSON object overriding `plugins`
pub const PLUGINS_VAR: &str = "NODEVIEW_CONFIG_PLUGINS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<NodesOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_preferred_seed: Option<BaseUrlOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<BTreeMap<String, PluginConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodesOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_public_explorer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_httpd_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_httpd_hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_local_httpd_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_node_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_httpd_scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<Vec<PinnedNode>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseUrlOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

impl ConfigOverride {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary variable lookup.
    ///
    /// Absent and empty variables leave the corresponding field unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            nodes: read(NODES_VAR)
                .map(|raw| decode(NODES_VAR, &raw))
                .transpose()?,
            support_website: read(SUPPORT_WEBSITE_VAR),
            fallback_preferred_seed: read(FALLBACK_PREFERRED_SEED_VAR)
                .map(|raw| decode(FALLBACK_PREFERRED_SEED_VAR, &raw))
                .transpose()?,
            plugins: read(PLUGINS_VAR)
                .map(|raw| decode(PLUGINS_VAR, &raw))
                .transpose()?,
        })
    }

    /// Whether no field is overridden.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn decode<T: DeserializeOwned>(variable: &'static str, raw: &str) -> Result<T, ConfigError> {
    serde_json::from_str(raw).map_err(|source| ConfigError::InvalidOverride { variable, source })
}
