//! Navigation routes.
//!
//! A [`Route`] describes where the user wants to go before any data has been
//! fetched. A [`LoadedRoute`] is the same request once everything needed to
//! render it is available. Both travel as `{ "resource": .., "params": .. }`
//! documents; unit variants omit `params`.
//!
//! `booting`, `notFound`, `loadError` and `session` need no fetching and are
//! identical in both unions. Domain variants (`home`, `nodes`, `project.*`)
//! carry request parameters in [`Route`] and opaque loader payloads in
//! [`LoadedRoute`].

use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::base_url::BaseUrl;
use crate::domain::error::RouteError;

/// Project-scoped resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectResource {
    Source,
    History,
    Commit,
    Issues,
    NewIssue,
    Issue,
    Patches,
    Patch,
    Board,
}

impl ProjectResource {
    pub const ALL: [Self; 9] = [
        Self::Source,
        Self::History,
        Self::Commit,
        Self::Issues,
        Self::NewIssue,
        Self::Issue,
        Self::Patches,
        Self::Patch,
        Self::Board,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "project.source",
            Self::History => "project.history",
            Self::Commit => "project.commit",
            Self::Issues => "project.issues",
            Self::NewIssue => "project.newIssue",
            Self::Issue => "project.issue",
            Self::Patches => "project.patches",
            Self::Patch => "project.patch",
            Self::Board => "project.board",
        }
    }
}

/// Route discriminant, the `resource` field of a route document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Booting,
    NotFound,
    LoadError,
    Session,
    Home,
    Nodes,
    Project(ProjectResource),
}

impl Resource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Booting => "booting",
            Self::NotFound => "notFound",
            Self::LoadError => "loadError",
            Self::Session => "session",
            Self::Home => "home",
            Self::Nodes => "nodes",
            Self::Project(project) => project.as_str(),
        }
    }

    /// Whether a route with this discriminant is already loaded.
    pub const fn is_static(self) -> bool {
        matches!(
            self,
            Self::Booting | Self::NotFound | Self::LoadError | Self::Session
        )
    }
}

impl FromStr for Resource {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let resource = match s {
            "booting" => Self::Booting,
            "notFound" => Self::NotFound,
            "loadError" => Self::LoadError,
            "session" => Self::Session,
            "home" => Self::Home,
            "nodes" => Self::Nodes,
            other => ProjectResource::ALL
                .into_iter()
                .find(|project| project.as_str() == other)
                .map(Self::Project)
                .ok_or_else(|| RouteError::UnknownResource(other.to_string()))?,
        };
        Ok(resource)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundParams {
    pub title: String,
}

/// Diagnostics shown by the error view when loading a route failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadErrorParams {
    pub title: String,
    pub error_message: String,
    pub stack_trace: String,
}

impl LoadErrorParams {
    /// Build diagnostics from a loader error.
    ///
    /// `error_message` is the outermost message, `stack_trace` the debug
    /// rendering with the cause chain and, when captured, the backtrace.
    pub fn from_error(title: impl Into<String>, error: &anyhow::Error) -> Self {
        Self {
            title: title.into(),
            error_message: error.to_string(),
            stack_trace: format!("{error:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionParams {
    pub id: String,
    pub signature: String,
    pub public_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodesParams {
    pub base_url: BaseUrl,
    #[serde(default)]
    pub project_page_index: u32,
}

/// Parameters shared by every project route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParams {
    pub node: BaseUrl,
    pub project: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceParams {
    pub node: BaseUrl,
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParams {
    pub node: BaseUrl,
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitParams {
    pub node: BaseUrl,
    pub project: String,
    pub commit: String,
}

/// Issue or patch listing, optionally filtered by state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    pub node: BaseUrl,
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueParams {
    pub node: BaseUrl,
    pub project: String,
    pub issue: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchParams {
    pub node: BaseUrl,
    pub project: String,
    pub patch: String,
}

/// The nine project-scoped routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRoute {
    Source(SourceParams),
    History(HistoryParams),
    Commit(CommitParams),
    Issues(ListingParams),
    NewIssue(ProjectParams),
    Issue(IssueParams),
    Patches(ListingParams),
    Patch(PatchParams),
    Board(ProjectParams),
}

impl ProjectRoute {
    pub const fn resource(&self) -> ProjectResource {
        match self {
            Self::Source(_) => ProjectResource::Source,
            Self::History(_) => ProjectResource::History,
            Self::Commit(_) => ProjectResource::Commit,
            Self::Issues(_) => ProjectResource::Issues,
            Self::NewIssue(_) => ProjectResource::NewIssue,
            Self::Issue(_) => ProjectResource::Issue,
            Self::Patches(_) => ProjectResource::Patches,
            Self::Patch(_) => ProjectResource::Patch,
            Self::Board(_) => ProjectResource::Board,
        }
    }

    /// Node serving the project.
    pub const fn node(&self) -> &BaseUrl {
        match self {
            Self::Source(p) => &p.node,
            Self::History(p) => &p.node,
            Self::Commit(p) => &p.node,
            Self::Issues(p) | Self::Patches(p) => &p.node,
            Self::NewIssue(p) | Self::Board(p) => &p.node,
            Self::Issue(p) => &p.node,
            Self::Patch(p) => &p.node,
        }
    }

    /// Repository id of the project.
    pub fn project(&self) -> &str {
        match self {
            Self::Source(p) => &p.project,
            Self::History(p) => &p.project,
            Self::Commit(p) => &p.project,
            Self::Issues(p) | Self::Patches(p) => &p.project,
            Self::NewIssue(p) | Self::Board(p) => &p.project,
            Self::Issue(p) => &p.project,
            Self::Patch(p) => &p.project,
        }
    }

    /// Route params as a JSON object.
    pub fn params(&self) -> serde_json::Result<Value> {
        match self {
            Self::Source(p) => serde_json::to_value(p),
            Self::History(p) => serde_json::to_value(p),
            Self::Commit(p) => serde_json::to_value(p),
            Self::Issues(p) | Self::Patches(p) => serde_json::to_value(p),
            Self::NewIssue(p) | Self::Board(p) => serde_json::to_value(p),
            Self::Issue(p) => serde_json::to_value(p),
            Self::Patch(p) => serde_json::to_value(p),
        }
    }

    fn serialize_params<S: SerializeStruct>(&self, state: &mut S) -> Result<(), S::Error> {
        match self {
            Self::Source(p) => state.serialize_field("params", p),
            Self::History(p) => state.serialize_field("params", p),
            Self::Commit(p) => state.serialize_field("params", p),
            Self::Issues(p) | Self::Patches(p) => state.serialize_field("params", p),
            Self::NewIssue(p) | Self::Board(p) => state.serialize_field("params", p),
            Self::Issue(p) => state.serialize_field("params", p),
            Self::Patch(p) => state.serialize_field("params", p),
        }
    }

    fn from_params(resource: ProjectResource, params: Value) -> Result<Self, RouteError> {
        let name = resource.as_str();
        let route = match resource {
            ProjectResource::Source => Self::Source(decode(name, params)?),
            ProjectResource::History => Self::History(decode(name, params)?),
            ProjectResource::Commit => Self::Commit(decode(name, params)?),
            ProjectResource::Issues => Self::Issues(decode(name, params)?),
            ProjectResource::NewIssue => Self::NewIssue(decode(name, params)?),
            ProjectResource::Issue => Self::Issue(decode(name, params)?),
            ProjectResource::Patches => Self::Patches(decode(name, params)?),
            ProjectResource::Patch => Self::Patch(decode(name, params)?),
            ProjectResource::Board => Self::Board(decode(name, params)?),
        };
        Ok(route)
    }
}

/// A navigation request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RouteDocument")]
pub enum Route {
    Booting,
    NotFound(NotFoundParams),
    LoadError(LoadErrorParams),
    Session(SessionParams),
    Home,
    Nodes(NodesParams),
    Project(ProjectRoute),
}

impl Route {
    pub fn not_found(title: impl Into<String>) -> Self {
        Self::NotFound(NotFoundParams {
            title: title.into(),
        })
    }

    pub const fn resource(&self) -> Resource {
        match self {
            Self::Booting => Resource::Booting,
            Self::NotFound(_) => Resource::NotFound,
            Self::LoadError(_) => Resource::LoadError,
            Self::Session(_) => Resource::Session,
            Self::Home => Resource::Home,
            Self::Nodes(_) => Resource::Nodes,
            Self::Project(project) => Resource::Project(project.resource()),
        }
    }
}

impl From<ProjectRoute> for Route {
    fn from(route: ProjectRoute) -> Self {
        Self::Project(route)
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if matches!(self, Self::Booting | Self::Home) { 1 } else { 2 };
        let mut state = serializer.serialize_struct("Route", fields)?;
        state.serialize_field("resource", self.resource().as_str())?;
        match self {
            Self::Booting | Self::Home => {}
            Self::NotFound(p) => state.serialize_field("params", p)?,
            Self::LoadError(p) => state.serialize_field("params", p)?,
            Self::Session(p) => state.serialize_field("params", p)?,
            Self::Nodes(p) => state.serialize_field("params", p)?,
            Self::Project(project) => project.serialize_params(&mut state)?,
        }
        state.end()
    }
}

impl TryFrom<RouteDocument> for Route {
    type Error = RouteError;

    fn try_from(document: RouteDocument) -> Result<Self, Self::Error> {
        let resource: Resource = document.resource.parse()?;
        let name = resource.as_str();
        let params = document.params;
        let route = match resource {
            Resource::Booting => Self::Booting,
            Resource::NotFound => Self::NotFound(decode(name, params)?),
            Resource::LoadError => Self::LoadError(decode(name, params)?),
            Resource::Session => Self::Session(decode(name, params)?),
            Resource::Home => Self::Home,
            Resource::Nodes => Self::Nodes(decode(name, params)?),
            Resource::Project(project) => {
                Self::Project(ProjectRoute::from_params(project, params)?)
            }
        };
        Ok(route)
    }
}

/// Data fetched for a project route, opaque to the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLoadedRoute {
    pub resource: ProjectResource,
    pub params: Value,
}

/// A navigation request with everything needed to render it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RouteDocument")]
pub enum LoadedRoute {
    Booting,
    NotFound(NotFoundParams),
    LoadError(LoadErrorParams),
    Session(SessionParams),
    Home(Value),
    Nodes(Value),
    Project(ProjectLoadedRoute),
}

impl LoadedRoute {
    pub const fn resource(&self) -> Resource {
        match self {
            Self::Booting => Resource::Booting,
            Self::NotFound(_) => Resource::NotFound,
            Self::LoadError(_) => Resource::LoadError,
            Self::Session(_) => Resource::Session,
            Self::Home(_) => Resource::Home,
            Self::Nodes(_) => Resource::Nodes,
            Self::Project(project) => Resource::Project(project.resource),
        }
    }

    pub const fn is_load_error(&self) -> bool {
        matches!(self, Self::LoadError(_))
    }
}

impl Serialize for LoadedRoute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if matches!(self, Self::Booting) { 1 } else { 2 };
        let mut state = serializer.serialize_struct("LoadedRoute", fields)?;
        state.serialize_field("resource", self.resource().as_str())?;
        match self {
            Self::Booting => {}
            Self::NotFound(p) => state.serialize_field("params", p)?,
            Self::LoadError(p) => state.serialize_field("params", p)?,
            Self::Session(p) => state.serialize_field("params", p)?,
            Self::Home(params) | Self::Nodes(params) => state.serialize_field("params", params)?,
            Self::Project(project) => state.serialize_field("params", &project.params)?,
        }
        state.end()
    }
}

impl TryFrom<RouteDocument> for LoadedRoute {
    type Error = RouteError;

    fn try_from(document: RouteDocument) -> Result<Self, Self::Error> {
        let resource: Resource = document.resource.parse()?;
        let name = resource.as_str();
        let params = document.params;
        let route = match resource {
            Resource::Booting => Self::Booting,
            Resource::NotFound => Self::NotFound(decode(name, params)?),
            Resource::LoadError => Self::LoadError(decode(name, params)?),
            Resource::Session => Self::Session(decode(name, params)?),
            Resource::Home => Self::Home(params),
            Resource::Nodes => Self::Nodes(params),
            Resource::Project(resource) => Self::Project(ProjectLoadedRoute { resource, params }),
        };
        Ok(route)
    }
}

/// Wire form of [`Route`] and [`LoadedRoute`]
#[derive(Debug, Deserialize)]
pub struct RouteDocument {
    resource: String,
    #[serde(default)]
    params: Value,
}

fn decode<T: DeserializeOwned>(resource: &'static str, params: Value) -> Result<T, RouteError> {
    serde_json::from_value(params).map_err(|source| RouteError::InvalidParams { resource, source })
}
