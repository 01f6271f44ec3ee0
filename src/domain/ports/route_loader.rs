use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{LoadedRoute, NodesParams, ProjectRoute};

/// Port for the node overview loader
///
/// Fetches what the `nodes` view needs for one node HTTP daemon.
///
/// # Examples
///
/// ```no_run
/// use nodeview::domain::models::{BaseUrl, NodesParams};
/// use nodeview::domain::ports::NodeRouteLoader;
///
/// async fn example(loader: &dyn NodeRouteLoader) -> anyhow::Result<()> {
///     let params = NodesParams {
///         base_url: BaseUrl::new("seed.radicle.xyz", 443, "https"),
///         project_page_index: 0,
///     };
///     let loaded = loader.load_node_route(params).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait NodeRouteLoader: Send + Sync {
    async fn load_node_route(&self, params: NodesParams) -> Result<LoadedRoute>;
}

/// Port for the home view loader
#[async_trait]
pub trait HomeRouteLoader: Send + Sync {
    async fn load_home_route(&self) -> Result<LoadedRoute>;
}

/// Port for the project views loader
///
/// Receives the whole route because each project variant carries different
/// params; implementations match on the variant themselves.
#[async_trait]
pub trait ProjectRouteLoader: Send + Sync {
    async fn load_project_route(&self, route: ProjectRoute) -> Result<LoadedRoute>;
}
