//! Nodeview - route resolution and configuration for a node explorer
//!
//! Turns locations into typed routes, resolves those routes into loaded
//! views through pluggable loaders, and assembles the explorer's runtime
//! configuration from a checked-in baseline plus environment overrides.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): route and config models, loader ports
//! - **Service Layer** (`services`): navigation and the route resolver
//! - **Infrastructure Layer** (`infrastructure`): config loading, HTTP daemon
//!   loaders, logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use nodeview::{route_from_location, ConfigLoader, HttpdClientImpl, HttpdLoaders, RouteResolver};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::new().load_shared()?;
//!     let loaders = HttpdLoaders::new(HttpdClientImpl::new()?, config.clone());
//!     let resolver = RouteResolver::from_loaders(Arc::new(loaders));
//!
//!     let route = route_from_location("/nodes/seed.radicle.garden", &config);
//!     let loaded = resolver.resolve(route).await;
//!     println!("{}", serde_json::to_string_pretty(&loaded)?);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    BaseUrl, Config, LoadedRoute, NodesConfig, PinnedNode, PluginConfig, ProjectRoute, Route,
};
pub use domain::ports::{HomeRouteLoader, NodeRouteLoader, ProjectRouteLoader};
pub use domain::RouteError;
pub use infrastructure::config::{ConfigError, ConfigLoader, ConfigOverride, ExecutionMode};
pub use infrastructure::httpd::{HttpdClientImpl, HttpdError, HttpdLoaders};
pub use services::{route_from_location, RouteResolver};
