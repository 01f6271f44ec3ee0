//! Node HTTP daemon integration
//!
//! - `client`: JSON client with status-to-error mapping
//! - `loaders`: route loaders implementing the domain ports

pub mod client;
pub mod errors;
pub mod loaders;

pub use client::{HttpdClientConfig, HttpdClientImpl};
pub use errors::HttpdError;
pub use loaders::HttpdLoaders;
