//! HTTP daemon loaders against a mock node.

mod common;

use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

use nodeview::domain::models::{
    IssueParams, LoadedRoute, NodesParams, PinnedNode, ProjectParams, ProjectRoute, SourceParams,
};
use nodeview::{ConfigLoader, HttpdClientImpl, HttpdError, HttpdLoaders, Route, RouteResolver};
use nodeview::{HomeRouteLoader, NodeRouteLoader, ProjectRouteLoader};

const RID: &str = "rad:z3gqcJUoA1n9HaHKufZs5FCSGazv5";

fn node_body(id: &str) -> String {
    json!({ "id": id, "version": "0.9.0-a1b2c3", "config": null, "state": "running" }).to_string()
}

fn loaders(pinned: Vec<PinnedNode>) -> HttpdLoaders {
    let mut config = ConfigLoader::new().baseline().unwrap();
    config.nodes.pinned = pinned;
    HttpdLoaders::new(HttpdClientImpl::new().unwrap(), Arc::new(config))
}

#[tokio::test]
async fn test_node_route_fetches_info_and_project_page() {
    let mut server = mockito::Server::new_async().await;
    let node = server
        .mock("GET", "/api/v1/node")
        .with_header("content-type", "application/json")
        .with_body(node_body("z6MksFqXN3Yhqk8pTJdUGLwATkRfQvwZXPqR2qMEhbS9wzpT"))
        .create_async()
        .await;
    let projects = server
        .mock("GET", "/api/v1/projects")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("show".into(), "all".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("perPage".into(), "10".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": "rad:z3gqc"}]"#)
        .create_async()
        .await;

    let base_url = common::mock_base_url(&server);
    let loaded = loaders(vec![])
        .load_node_route(NodesParams {
            base_url: base_url.clone(),
            project_page_index: 2,
        })
        .await
        .unwrap();

    node.assert_async().await;
    projects.assert_async().await;

    let LoadedRoute::Nodes(params) = loaded else {
        panic!("Expected nodes route");
    };
    assert_eq!(params["projectPageIndex"], json!(2));
    assert_eq!(params["node"]["state"], json!("running"));
    assert_eq!(params["projects"][0]["id"], json!("rad:z3gqc"));
    assert_eq!(params["baseUrl"]["hostname"], json!(base_url.hostname));
}

#[tokio::test]
async fn test_home_route_tolerates_unreachable_pinned_node() {
    common::setup_test_logging();

    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/node")
        .with_header("content-type", "application/json")
        .with_body(node_body("z6Mk"))
        .create_async()
        .await;

    let reachable = common::mock_base_url(&server);
    let mut gone = reachable.clone();
    gone.port = 1;

    let loaded = loaders(vec![
        PinnedNode {
            base_url: reachable,
        },
        PinnedNode { base_url: gone },
    ])
    .load_home_route()
    .await
    .unwrap();

    let LoadedRoute::Home(params) = loaded else {
        panic!("Expected home route");
    };
    assert_eq!(params["nodes"][0]["node"]["id"], json!("z6Mk"));
    assert_eq!(params["nodes"][1]["node"], json!(null));
}

#[tokio::test]
async fn test_source_route_uses_project_head() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", format!("/api/v1/projects/{RID}").as_str())
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": RID, "head": "f0e1d2" }).to_string())
        .create_async()
        .await;
    let tree = server
        .mock("GET", format!("/api/v1/projects/{RID}/tree/f0e1d2/src").as_str())
        .with_header("content-type", "application/json")
        .with_body(r#"{"entries": []}"#)
        .create_async()
        .await;

    let route = ProjectRoute::Source(SourceParams {
        node: common::mock_base_url(&server),
        project: RID.to_string(),
        peer: None,
        revision: None,
        path: Some("src".to_string()),
    });
    let loaded = loaders(vec![]).load_project_route(route).await.unwrap();

    tree.assert_async().await;
    let LoadedRoute::Project(project) = loaded else {
        panic!("Expected project route");
    };
    assert_eq!(project.params["project"]["head"], json!("f0e1d2"));
    assert_eq!(project.params["tree"], json!({ "entries": [] }));
    assert_eq!(project.params["path"], json!("src"));
}

#[tokio::test]
async fn test_issue_route_fetches_issue() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", format!("/api/v1/projects/{RID}").as_str())
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": RID, "head": "f0e1d2" }).to_string())
        .create_async()
        .await;
    server
        .mock("GET", format!("/api/v1/projects/{RID}/issues/9a8b").as_str())
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "9a8b", "title": "Broken link"}"#)
        .create_async()
        .await;

    let route = ProjectRoute::Issue(IssueParams {
        node: common::mock_base_url(&server),
        project: RID.to_string(),
        issue: "9a8b".to_string(),
    });
    let loaded = loaders(vec![]).load_project_route(route).await.unwrap();

    let LoadedRoute::Project(project) = loaded else {
        panic!("Expected project route");
    };
    assert_eq!(project.params["issue"]["title"], json!("Broken link"));
}

#[tokio::test]
async fn test_missing_project_maps_to_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", format!("/api/v1/projects/{RID}").as_str())
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;

    let route = ProjectRoute::NewIssue(ProjectParams {
        node: common::mock_base_url(&server),
        project: RID.to_string(),
    });
    let err = loaders(vec![]).load_project_route(route).await.unwrap_err();

    assert!(matches!(err.downcast_ref::<HttpdError>(), Some(HttpdError::NotFound(_))));
}

#[tokio::test]
async fn test_server_error_resolves_to_load_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", format!("/api/v1/projects/{RID}").as_str())
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    let resolver = RouteResolver::from_loaders(Arc::new(loaders(vec![])));
    let route = Route::Project(ProjectRoute::Board(ProjectParams {
        node: common::mock_base_url(&server),
        project: RID.to_string(),
    }));

    match resolver.resolve(route).await {
        LoadedRoute::LoadError(params) => {
            assert!(params.error_message.contains("Failed to load project"));
            assert!(params.stack_trace.contains("503"));
        }
        other => panic!("Expected loadError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_node_body_off_schema_fails_node_route() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/node")
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "z6Mk", "state": "sleeping"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/projects")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let err = loaders(vec![])
        .load_node_route(NodesParams {
            base_url: common::mock_base_url(&server),
            project_page_index: 0,
        })
        .await
        .unwrap_err();

    assert!(matches!(err.downcast_ref::<HttpdError>(), Some(HttpdError::InvalidBody(_))));
}
