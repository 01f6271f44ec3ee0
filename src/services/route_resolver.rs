//! Route resolution.
//!
//! Turns a [`Route`] into a [`LoadedRoute`] by calling at most one injected
//! loader. Resolution never fails: a loader error or panic becomes a
//! `loadError` route so the caller always has something to render.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use crate::domain::models::{LoadErrorParams, LoadedRoute, Route};
use crate::domain::ports::{HomeRouteLoader, NodeRouteLoader, ProjectRouteLoader};

/// Title of the error view shown when a loader fails.
pub const LOAD_ERROR_TITLE: &str = "Could not load this page";

/// Stateless dispatcher from routes to loaders.
///
/// Each call to [`RouteResolver::resolve`] is independent: there is no cache,
/// no retry and no ordering between overlapping calls. Callers that navigate
/// quickly must discard stale results themselves.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use nodeview::domain::models::Route;
/// use nodeview::infrastructure::httpd::HttpdLoaders;
/// use nodeview::services::RouteResolver;
///
/// async fn example(loaders: Arc<HttpdLoaders>) {
///     let resolver = RouteResolver::from_loaders(loaders);
///     let loaded = resolver.resolve(Route::Home).await;
///     println!("{}", serde_json::to_string(&loaded).unwrap());
/// }
/// ```
#[derive(Clone)]
pub struct RouteResolver {
    nodes: Arc<dyn NodeRouteLoader>,
    home: Arc<dyn HomeRouteLoader>,
    projects: Arc<dyn ProjectRouteLoader>,
}

impl RouteResolver {
    /// Creates a resolver from one loader per resource family
    pub fn new(
        nodes: Arc<dyn NodeRouteLoader>,
        home: Arc<dyn HomeRouteLoader>,
        projects: Arc<dyn ProjectRouteLoader>,
    ) -> Self {
        Self {
            nodes,
            home,
            projects,
        }
    }

    /// Creates a resolver from a single type implementing every loader
    pub fn from_loaders<L>(loaders: Arc<L>) -> Self
    where
        L: NodeRouteLoader + HomeRouteLoader + ProjectRouteLoader + 'static,
    {
        Self::new(loaders.clone(), loaders.clone(), loaders)
    }

    /// Resolve a route.
    ///
    /// `booting`, `notFound`, `loadError` and `session` are returned as they
    /// are. `nodes` goes to the node loader with its params, `home` to the
    /// home loader, and every `project.*` route to the project loader with
    /// the whole route.
    #[instrument(skip(self, route), fields(resource = %route.resource()))]
    pub async fn resolve(&self, route: Route) -> LoadedRoute {
        let resource = route.resource();
        let pending = match route {
            Route::Booting => return LoadedRoute::Booting,
            Route::NotFound(params) => return LoadedRoute::NotFound(params),
            Route::LoadError(params) => return LoadedRoute::LoadError(params),
            Route::Session(params) => return LoadedRoute::Session(params),
            Route::Nodes(params) => self.nodes.load_node_route(params),
            Route::Home => self.home.load_home_route(),
            Route::Project(project) => self.projects.load_project_route(project),
        };

        match AssertUnwindSafe(pending).catch_unwind().await {
            Ok(Ok(loaded)) => {
                debug!(loaded = %loaded.resource(), "Route loaded");
                loaded
            }
            Ok(Err(err)) => {
                warn!(error = %format!("{err:#}"), "Route loader failed");
                LoadedRoute::LoadError(LoadErrorParams::from_error(LOAD_ERROR_TITLE, &err))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(%message, "Route loader panicked");
                LoadedRoute::LoadError(LoadErrorParams {
                    title: LOAD_ERROR_TITLE.to_string(),
                    stack_trace: format!("loader for {resource} panicked: {message}"),
                    error_message: message,
                })
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "loader panicked".to_string())
}
