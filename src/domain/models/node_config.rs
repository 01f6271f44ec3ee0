//! Schemas for node daemon responses.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// `{ "success": true }` acknowledgement
///
/// Returned by the daemon's write endpoints. The loaders in this crate only
/// read, so this is exported for consumers that issue writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessResponse;

impl Serialize for SuccessResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Body {
            success: bool,
        }
        Body { success: true }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SuccessResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Body {
            success: bool,
        }
        let body = Body::deserialize(deserializer)?;
        if body.success {
            Ok(Self)
        } else {
            Err(de::Error::invalid_value(
                de::Unexpected::Bool(false),
                &"success: true",
            ))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    Allow,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Followed,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Peers {
    Static,
    Dynamic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Onion {
    Proxy { address: String },
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Main,
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relay {
    Always,
    Never,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    pub fill_rate: f64,
    pub capacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateLimits {
    pub inbound: RateLimit,
    pub outbound: RateLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionLimits {
    pub inbound: u64,
    pub outbound: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    pub routing_max_size: u64,
    pub routing_max_age: u64,
    pub fetch_concurrency: u64,
    pub gossip_max_age: u64,
    pub max_open_files: u64,
    pub rate: RateLimits,
    pub connection: ConnectionLimits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedingPolicy {
    pub default: Policy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

/// Configuration a node reports through `GET /api/v1/node`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    pub alias: String,
    pub peers: Peers,
    pub listen: Vec<String>,
    pub connect: Vec<String>,
    pub external_addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onion: Option<Onion>,
    pub log: LogLevel,
    pub network: Network,
    pub relay: Relay,
    pub limits: Limits,
    pub workers: u64,
    pub seeding_policy: SeedingPolicy,
}

/// Whether a node's daemon is up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    Running,
    Stopped,
}

/// Body of `GET /api/v1/node`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub id: String,
    pub version: String,
    /// `null` when the daemon could not read the node's configuration
    #[serde(default)]
    pub config: Option<NodeConfig>,
    pub state: NodeState,
}
