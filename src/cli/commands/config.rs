//! `nodeview config`

use anyhow::{Context, Result};
use std::path::Path;

use super::config_loader;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
pub struct ConfigOutput {
    pub config: Config,
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        let nodes = &self.config.nodes;
        let mut lines = vec![
            format!("API version:       {}", nodes.api_version),
            format!("Default node:      {}", nodes.default_base_url()),
            format!("Local httpd port:  {}", nodes.default_local_httpd_port),
            format!("Node port:         {}", nodes.default_node_port),
            format!("Explorer:          {}", nodes.fallback_public_explorer),
            format!("Support website:   {}", self.config.support_website),
            format!("Fallback seed:     {}", self.config.fallback_preferred_seed),
        ];

        if nodes.pinned.is_empty() {
            lines.push("Pinned nodes:      none".to_string());
        } else {
            lines.push("Pinned nodes:".to_string());
            lines.extend(nodes.pinned.iter().map(|p| format!("  {}", p.base_url)));
        }

        match &self.config.plugins {
            Some(plugins) if !plugins.is_empty() => {
                lines.push("Plugins:".to_string());
                lines.extend(plugins.iter().map(|(name, plugin)| {
                    let state = if plugin.enabled { "enabled" } else { "disabled" };
                    format!("  {name} ({state})")
                }));
            }
            _ => lines.push("Plugins:           none".to_string()),
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print the assembled configuration
pub fn execute(baseline: Option<&Path>, json_mode: bool) -> Result<()> {
    let config = config_loader(baseline)
        .load()
        .context("Failed to load configuration")?;

    output(&ConfigOutput { config }, json_mode);
    Ok(())
}
