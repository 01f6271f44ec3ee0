use thiserror::Error;

/// Errors decoding a route document
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Unknown route resource: {0}")]
    UnknownResource(String),

    #[error("Invalid params for {resource} route: {source}")]
    InvalidParams {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
