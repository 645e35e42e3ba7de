//! Tests for the static site endpoints and the header search.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn route_table_lists_public_and_admin_pages() {
    let test = common::build_test_app();
    let json = body_json(get(test.app(), "/api/v1/site/routes").await).await;

    let routes = json["data"].as_array().unwrap();
    assert!(routes.iter().any(|r| r["path"] == "/careers" && r["area"] == "public"));
    assert!(routes
        .iter()
        .any(|r| r["path"] == "/admin/dashboard" && r["requires_auth"] == true));
}

#[tokio::test]
async fn resolve_route_handles_trailing_slash_and_hash() {
    let test = common::build_test_app();

    let json = body_json(get(test.app(), "/api/v1/site/routes/resolve?path=/careers/").await).await;
    assert_eq!(json["data"]["page"], "careers");

    let json = body_json(
        get(test.app(), "/api/v1/site/routes/resolve?path=%23/admin/login").await,
    )
    .await;
    assert_eq!(json["data"]["requires_auth"], false);
}

#[tokio::test]
async fn resolve_unknown_route_returns_404() {
    let test = common::build_test_app();
    let response = get(test.app(), "/api/v1/site/routes/resolve?path=/nowhere").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn page_content_by_slug() {
    let test = common::build_test_app();

    let response = get(test.app(), "/api/v1/site/pages/about").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["slug"], "about");

    let response = get(test.app(), "/api/v1/site/pages/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expertise_areas_are_listed() {
    let test = common::build_test_app();
    let json = body_json(get(test.app(), "/api/v1/site/expertise").await).await;
    let slugs: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["slug"].as_str())
        .collect();
    assert!(slugs.contains(&"verification"));
    assert!(slugs.contains(&"physical-design"));
}

#[tokio::test]
async fn intro_schedule_ends_in_done_phase() {
    let test = common::build_test_app();
    let json = body_json(get(test.app(), "/api/v1/site/intro").await).await;

    assert_eq!(json["data"]["initial"], 0);
    let steps = json["data"]["steps"].as_array().unwrap();
    assert_eq!(steps.last().unwrap()["phase"], 4);
}

#[tokio::test]
async fn search_is_case_insensitive() {
    let test = common::build_test_app();
    let json = body_json(get(test.app(), "/api/v1/search?q=VERIFICATION").await).await;

    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["title"].as_str())
        .collect();
    assert!(titles.contains(&"Design Verification"));
}

#[tokio::test]
async fn blank_search_returns_nothing() {
    let test = common::build_test_app();
    for uri in ["/api/v1/search", "/api/v1/search?q=", "/api/v1/search?q=%20%20"] {
        let json = body_json(get(test.app(), uri).await).await;
        assert_eq!(json["data"], serde_json::json!([]), "{uri}");
    }
}
