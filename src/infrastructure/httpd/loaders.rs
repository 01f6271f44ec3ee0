//! Route loaders backed by node HTTP daemons.
//!
//! Node information is decoded against the node schema. Everything else is
//! packaged into loaded routes as opaque JSON; nothing here interprets
//! repositories, issues or patches beyond picking the project head when no
//! revision was requested.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::future::join_all;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{instrument, warn};

use super::client::HttpdClientImpl;
use crate::domain::models::{
    BaseUrl, Config, LoadedRoute, NodesParams, ProjectLoadedRoute, ProjectRoute,
};
use crate::domain::ports::{HomeRouteLoader, NodeRouteLoader, ProjectRouteLoader};

/// Projects listed per page on the node view
pub const PROJECTS_PER_PAGE: u32 = 10;

/// Loaders for every route family, sharing one HTTP client
pub struct HttpdLoaders {
    client: HttpdClientImpl,
    config: Arc<Config>,
}

impl HttpdLoaders {
    pub const fn new(client: HttpdClientImpl, config: Arc<Config>) -> Self {
        Self { client, config }
    }

    async fn node_entry(&self, base_url: &BaseUrl) -> Value {
        match self.client.get_node(base_url).await {
            Ok(node) => json!({ "baseUrl": base_url, "node": node }),
            Err(err) => {
                warn!(node = %base_url, error = %err, "Pinned node unavailable");
                json!({ "baseUrl": base_url, "node": null })
            }
        }
    }
}

#[async_trait]
impl HomeRouteLoader for HttpdLoaders {
    #[instrument(skip(self))]
    async fn load_home_route(&self) -> Result<LoadedRoute> {
        let nodes = join_all(
            self.config
                .nodes
                .pinned
                .iter()
                .map(|pinned| self.node_entry(&pinned.base_url)),
        )
        .await;

        Ok(LoadedRoute::Home(json!({ "nodes": nodes })))
    }
}

#[async_trait]
impl NodeRouteLoader for HttpdLoaders {
    #[instrument(skip(self), fields(node = %params.base_url))]
    async fn load_node_route(&self, params: NodesParams) -> Result<LoadedRoute> {
        let node = &params.base_url;
        let query = [
            ("show", "all".to_string()),
            ("page", params.project_page_index.to_string()),
            ("perPage", PROJECTS_PER_PAGE.to_string()),
        ];

        let (info, projects) = tokio::try_join!(
            self.client.get_node(node),
            self.client.get_json(node, "/projects", &query),
        )
        .with_context(|| format!("Failed to load node {node}"))?;

        Ok(LoadedRoute::Nodes(json!({
            "baseUrl": params.base_url,
            "projectPageIndex": params.project_page_index,
            "node": info,
            "projects": projects,
        })))
    }
}

#[async_trait]
impl ProjectRouteLoader for HttpdLoaders {
    #[instrument(skip(self, route), fields(resource = %route.resource().as_str()))]
    async fn load_project_route(&self, route: ProjectRoute) -> Result<LoadedRoute> {
        let node = route.node();
        let rid = route.project();
        let base = format!("/projects/{rid}");

        let project = self
            .client
            .get_json(node, &base, &[])
            .await
            .with_context(|| format!("Failed to load project {rid} from {node}"))?;

        let payload = match &route {
            ProjectRoute::Source(p) => {
                let revision = revision_or_head(p.revision.as_deref(), &project)?;
                let path = p.path.as_deref().unwrap_or_default();
                let tree = self
                    .client
                    .get_json(node, &format!("{base}/tree/{revision}/{path}"), &[])
                    .await
                    .with_context(|| format!("Failed to load tree at {revision}"))?;
                Some(("tree", tree))
            }
            ProjectRoute::History(p) => {
                let revision = revision_or_head(p.revision.as_deref(), &project)?;
                let commits = self
                    .client
                    .get_json(node, &format!("{base}/commits"), &[("parent", revision)])
                    .await
                    .context("Failed to load commit history")?;
                Some(("commits", commits))
            }
            ProjectRoute::Commit(p) => {
                let commit = self
                    .client
                    .get_json(node, &format!("{base}/commits/{}", p.commit), &[])
                    .await
                    .with_context(|| format!("Failed to load commit {}", p.commit))?;
                Some(("commit", commit))
            }
            ProjectRoute::Issues(p) => {
                let state = p.state.clone().unwrap_or_else(|| "open".to_string());
                let issues = self
                    .client
                    .get_json(node, &format!("{base}/issues"), &[("state", state)])
                    .await
                    .context("Failed to load issues")?;
                Some(("issues", issues))
            }
            ProjectRoute::Issue(p) => {
                let issue = self
                    .client
                    .get_json(node, &format!("{base}/issues/{}", p.issue), &[])
                    .await
                    .with_context(|| format!("Failed to load issue {}", p.issue))?;
                Some(("issue", issue))
            }
            ProjectRoute::Patches(p) => {
                let state = p.state.clone().unwrap_or_else(|| "open".to_string());
                let patches = self
                    .client
                    .get_json(node, &format!("{base}/patches"), &[("state", state)])
                    .await
                    .context("Failed to load patches")?;
                Some(("patches", patches))
            }
            ProjectRoute::Patch(p) => {
                let patch = self
                    .client
                    .get_json(node, &format!("{base}/patches/{}", p.patch), &[])
                    .await
                    .with_context(|| format!("Failed to load patch {}", p.patch))?;
                Some(("patch", patch))
            }
            ProjectRoute::NewIssue(_) | ProjectRoute::Board(_) => None,
        };

        let mut params = match route.params()? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        params.insert("project".to_string(), project);
        if let Some((key, value)) = payload {
            params.insert(key.to_string(), value);
        }

        Ok(LoadedRoute::Project(ProjectLoadedRoute {
            resource: route.resource(),
            params: Value::Object(params),
        }))
    }
}

/// Requested revision, or the project's canonical head.
fn revision_or_head(revision: Option<&str>, project: &Value) -> Result<String> {
    revision
        .or_else(|| project.get("head").and_then(Value::as_str))
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Project has no head and no revision was requested"))
}
