//! Port trait definitions (Hexagonal Architecture)
//!
//! Loader capabilities the route resolver dispatches to:
//! - NodeRouteLoader: node overview
//! - HomeRouteLoader: home view
//! - ProjectRouteLoader: the nine project views
//!
//! The resolver only sees these traits, so tests can substitute fakes and the
//! HTTP daemon adapters live in the infrastructure layer.

pub mod route_loader;

pub use route_loader::{HomeRouteLoader, NodeRouteLoader, ProjectRouteLoader};
