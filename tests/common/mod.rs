//! Common test utilities for integration tests
//!
//! Shared loaders, fixtures and logging setup used across the integration
//! test files.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

use nodeview::domain::models::{
    BaseUrl, CommitParams, HistoryParams, IssueParams, ListingParams, LoadedRoute, NodesParams,
    PatchParams, ProjectLoadedRoute, ProjectParams, ProjectRoute, SourceParams,
};
use nodeview::{HomeRouteLoader, NodeRouteLoader, ProjectRouteLoader};

/// Setup test logging
///
/// Call this at the beginning of tests that need log output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn seed() -> BaseUrl {
    BaseUrl::new("seed.radicle.garden", 443, "https")
}

/// Base URL of a mockito server
pub fn mock_base_url(server: &mockito::ServerGuard) -> BaseUrl {
    let address = server.socket_address();
    BaseUrl::new(address.ip().to_string(), address.port(), "http")
}

/// Loaders that answer from memory and record which one was called
#[derive(Default)]
pub struct StubLoaders {
    pub calls: Mutex<Vec<String>>,
    pub project_routes: Mutex<Vec<ProjectRoute>>,
    pub fail_with: Option<String>,
}

impl StubLoaders {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Every project route received, exactly as it was passed in
    pub fn project_routes(&self) -> Vec<ProjectRoute> {
        self.project_routes.lock().unwrap().clone()
    }

    fn record(&self, call: &str) -> Result<()> {
        self.calls.lock().unwrap().push(call.to_string());
        match &self.fail_with {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NodeRouteLoader for StubLoaders {
    async fn load_node_route(&self, params: NodesParams) -> Result<LoadedRoute> {
        self.record("nodes")?;
        Ok(LoadedRoute::Nodes(json!({
            "baseUrl": params.base_url,
            "projectPageIndex": params.project_page_index,
        })))
    }
}

#[async_trait]
impl HomeRouteLoader for StubLoaders {
    async fn load_home_route(&self) -> Result<LoadedRoute> {
        self.record("home")?;
        Ok(LoadedRoute::Home(json!({ "nodes": [] })))
    }
}

#[async_trait]
impl ProjectRouteLoader for StubLoaders {
    async fn load_project_route(&self, route: ProjectRoute) -> Result<LoadedRoute> {
        self.project_routes.lock().unwrap().push(route.clone());
        self.record(route.resource().as_str())?;
        Ok(stub_project_payload(&route))
    }
}

/// What [`StubLoaders`] answers for a project route
pub fn stub_project_payload(route: &ProjectRoute) -> LoadedRoute {
    let mut params = route.params().unwrap();
    params["loadedBy"] = json!("stub");
    LoadedRoute::Project(ProjectLoadedRoute {
        resource: route.resource(),
        params,
    })
}

/// One route per project view, all on the same node and repository
pub fn every_project_route(node: &BaseUrl, rid: &str, id: &str) -> Vec<ProjectRoute> {
    let project = ProjectParams {
        node: node.clone(),
        project: rid.to_string(),
    };
    let listing = ListingParams {
        node: node.clone(),
        project: rid.to_string(),
        state: Some("closed".to_string()),
    };

    vec![
        ProjectRoute::Source(SourceParams {
            node: node.clone(),
            project: rid.to_string(),
            peer: None,
            revision: Some(id.to_string()),
            path: Some("README.md".to_string()),
        }),
        ProjectRoute::History(HistoryParams {
            node: node.clone(),
            project: rid.to_string(),
            peer: Some("z6MkPeer".to_string()),
            revision: None,
        }),
        ProjectRoute::Commit(CommitParams {
            node: node.clone(),
            project: rid.to_string(),
            commit: id.to_string(),
        }),
        ProjectRoute::Issues(listing.clone()),
        ProjectRoute::NewIssue(project.clone()),
        ProjectRoute::Issue(IssueParams {
            node: node.clone(),
            project: rid.to_string(),
            issue: id.to_string(),
        }),
        ProjectRoute::Patches(listing),
        ProjectRoute::Patch(PatchParams {
            node: node.clone(),
            project: rid.to_string(),
            patch: id.to_string(),
        }),
        ProjectRoute::Board(project),
    ]
}
