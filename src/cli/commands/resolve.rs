//! `nodeview resolve <LOCATION>`

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use super::config_loader;
use crate::cli::output::{indented_json, output, CommandOutput};
use crate::cli::types::LocationArgs;
use crate::domain::models::{LoadedRoute, Route};
use crate::infrastructure::httpd::{HttpdClientImpl, HttpdLoaders};
use crate::services::{route_from_location, RouteResolver};

#[derive(Debug, serde::Serialize)]
pub struct ResolveOutput {
    pub route: Route,
    pub loaded: LoadedRoute,
}

impl CommandOutput for ResolveOutput {
    fn to_human(&self) -> String {
        let status = if self.loaded.is_load_error() {
            "failed to load"
        } else {
            "loaded"
        };
        format!(
            "{} ({status})\n{}",
            self.loaded.resource(),
            indented_json(&self.loaded)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.loaded).unwrap_or_default()
    }
}

/// Map a location to a route and load it from the node daemons.
///
/// A load failure is reported as a `loadError` view, not as a command error.
pub async fn execute(args: LocationArgs, baseline: Option<&Path>, json_mode: bool) -> Result<()> {
    let config = config_loader(baseline)
        .load_shared()
        .context("Failed to load configuration")?;

    let client = HttpdClientImpl::new()?;
    let resolver = RouteResolver::from_loaders(Arc::new(HttpdLoaders::new(client, config.clone())));

    let route = route_from_location(&args.location, &config);
    let loaded = resolver.resolve(route.clone()).await;

    output(&ResolveOutput { route, loaded }, json_mode);
    Ok(())
}
