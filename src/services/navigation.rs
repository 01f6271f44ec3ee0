//! Mapping of URL-like locations to routes.
//!
//! Locations look like `/nodes/<host>/<rid>/issues?state=closed`. Absolute
//! URLs are accepted too; only their path and query are used. Anything that
//! does not match a known view becomes a `notFound` route.

use reqwest::Url;
use std::collections::HashMap;
use tracing::debug;

use crate::domain::models::base_url::is_loopback;
use crate::domain::models::{
    BaseUrl, CommitParams, Config, HistoryParams, IssueParams, ListingParams, NodesParams,
    PatchParams, ProjectParams, ProjectRoute, Route, SessionParams, SourceParams,
    PLANNING_BOARDS_PLUGIN,
};

/// Title of the view shown for unknown locations.
pub const NOT_FOUND_TITLE: &str = "Page not found";

/// Map a location to the route that renders it.
pub fn route_from_location(location: &str, config: &Config) -> Route {
    let route = parse_location(location).and_then(|url| {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        route_from_segments(&segments, &query, config)
    });

    route.unwrap_or_else(|| {
        debug!(location, "No route matches location");
        Route::not_found(NOT_FOUND_TITLE)
    })
}

fn parse_location(location: &str) -> Option<Url> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return Url::parse(location).ok();
    }
    Url::parse("http://nodeview.invalid/")
        .ok()?
        .join(location)
        .ok()
}

fn route_from_segments(
    segments: &[&str],
    query: &HashMap<String, String>,
    config: &Config,
) -> Option<Route> {
    match segments {
        [] => Some(Route::Home),
        ["session", id] => Some(Route::Session(SessionParams {
            id: (*id).to_string(),
            signature: query.get("sig")?.clone(),
            public_key: query.get("pk")?.clone(),
        })),
        ["nodes", host] => Some(Route::Nodes(NodesParams {
            base_url: node_from_host(host, config)?,
            project_page_index: 0,
        })),
        ["nodes", host, rid, rest @ ..] => {
            let node = node_from_host(host, config)?;
            project_route(node, rid, rest, query, config).map(Route::Project)
        }
        _ => None,
    }
}

fn project_route(
    node: BaseUrl,
    rid: &str,
    rest: &[&str],
    query: &HashMap<String, String>,
    config: &Config,
) -> Option<ProjectRoute> {
    let project = rid.to_string();
    let (peer, rest) = match rest {
        ["remotes", peer, rest @ ..] => (Some((*peer).to_string()), rest),
        _ => (None, rest),
    };

    let route = match rest {
        [] => ProjectRoute::Source(SourceParams {
            node,
            project,
            peer,
            revision: None,
            path: None,
        }),
        ["tree", revision, path @ ..] => ProjectRoute::Source(SourceParams {
            node,
            project,
            peer,
            revision: Some((*revision).to_string()),
            path: (!path.is_empty()).then(|| path.join("/")),
        }),
        ["history"] => ProjectRoute::History(HistoryParams {
            node,
            project,
            peer,
            revision: None,
        }),
        ["history", revision] => ProjectRoute::History(HistoryParams {
            node,
            project,
            peer,
            revision: Some((*revision).to_string()),
        }),
        _ if peer.is_some() => return None,
        ["commits", commit] => ProjectRoute::Commit(CommitParams {
            node,
            project,
            commit: (*commit).to_string(),
        }),
        ["issues"] => ProjectRoute::Issues(ListingParams {
            node,
            project,
            state: query.get("state").cloned(),
        }),
        ["issues", "new"] => ProjectRoute::NewIssue(ProjectParams { node, project }),
        ["issues", issue] => ProjectRoute::Issue(IssueParams {
            node,
            project,
            issue: (*issue).to_string(),
        }),
        ["patches"] => ProjectRoute::Patches(ListingParams {
            node,
            project,
            state: query.get("state").cloned(),
        }),
        ["patches", patch] => ProjectRoute::Patch(PatchParams {
            node,
            project,
            patch: (*patch).to_string(),
        }),
        ["board"] if config.plugin_enabled(PLANNING_BOARDS_PLUGIN) => {
            ProjectRoute::Board(ProjectParams { node, project })
        }
        _ => return None,
    };
    Some(route)
}

/// `hostname` or `hostname:port`, completed with the configured defaults.
///
/// IPv6 addresses must be bracketed (`[::1]`, `[::1]:8080`).
fn node_from_host(host: &str, config: &Config) -> Option<BaseUrl> {
    let (hostname, port) = split_host_port(host)?;
    if hostname.is_empty() || (hostname.contains(':') && !hostname.starts_with('[')) {
        return None;
    }

    let defaults = &config.nodes;
    let node = if is_loopback(hostname) {
        BaseUrl::new(hostname, port.unwrap_or(defaults.default_local_httpd_port), "http")
    } else {
        BaseUrl::new(
            hostname,
            port.unwrap_or(defaults.default_httpd_port),
            defaults.default_httpd_scheme.clone(),
        )
    };
    Some(node)
}

fn split_host_port(host: &str) -> Option<(&str, Option<u16>)> {
    let (hostname, port) = if host.starts_with('[') {
        let end = host.find(']')? + 1;
        let (hostname, rest) = host.split_at(end);
        match rest {
            "" => (hostname, None),
            _ => (hostname, Some(rest.strip_prefix(':')?)),
        }
    } else {
        match host.rsplit_once(':') {
            Some((hostname, port)) => (hostname, Some(port)),
            None => (host, None),
        }
    };

    let port = match port {
        Some(port) => Some(port.parse::<u16>().ok()?),
        None => None,
    };
    Some((hostname, port))
}
