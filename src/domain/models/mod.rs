pub mod base_url;
pub mod code_location;
pub mod config;
pub mod node_config;
pub mod route;

pub use base_url::BaseUrl;
pub use code_location::{Author, CodeLocation, Range, Span};
pub use config::{Config, NodesConfig, PinnedNode, PluginConfig, PLANNING_BOARDS_PLUGIN};
pub use node_config::{NodeConfig, NodeInfo, NodeState, SuccessResponse};
pub use route::{
    CommitParams, HistoryParams, IssueParams, ListingParams, LoadErrorParams, LoadedRoute,
    NodesParams, NotFoundParams, PatchParams, ProjectLoadedRoute, ProjectParams, ProjectResource,
    ProjectRoute, Resource, Route, SessionParams, SourceParams,
};
