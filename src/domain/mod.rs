//! Domain layer: navigation routes, configuration shape and the loader ports.

pub mod error;
pub mod models;
pub mod ports;

pub use error::RouteError;
