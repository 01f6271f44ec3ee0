//! Infrastructure layer module
//!
//! Adapters and ambient concerns around the domain:
//! - Configuration loading (baseline, environment overrides, harness modes)
//! - Node HTTP daemon client and route loaders
//! - Logging infrastructure
//!
//! Loaders here satisfy the port traits defined in the domain layer.

pub mod config;
pub mod httpd;
pub mod logging;
