//! CLI command implementations.

pub mod config;
pub mod resolve;
pub mod route;

use std::path::Path;

use crate::infrastructure::config::ConfigLoader;

/// Config loader honouring the global `--baseline` flag.
pub(crate) fn config_loader(baseline: Option<&Path>) -> ConfigLoader {
    baseline.map_or_else(ConfigLoader::new, ConfigLoader::with_baseline_file)
}
