//! `nodeview route <LOCATION>`

use anyhow::{Context, Result};
use std::path::Path;

use super::config_loader;
use crate::cli::output::{indented_json, output, CommandOutput};
use crate::cli::types::LocationArgs;
use crate::domain::models::Route;
use crate::services::route_from_location;

#[derive(Debug, serde::Serialize)]
pub struct RouteOutput {
    pub location: String,
    pub route: Route,
}

impl CommandOutput for RouteOutput {
    fn to_human(&self) -> String {
        format!(
            "{} -> {}\n{}",
            self.location,
            self.route.resource(),
            indented_json(&self.route)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.route).unwrap_or_default()
    }
}

/// Print the route a location maps to
pub fn execute(args: LocationArgs, baseline: Option<&Path>, json_mode: bool) -> Result<()> {
    let config = config_loader(baseline)
        .load()
        .context("Failed to load configuration")?;

    let route = route_from_location(&args.location, &config);
    output(
        &RouteOutput {
            location: args.location,
            route,
        },
        json_mode,
    );
    Ok(())
}
