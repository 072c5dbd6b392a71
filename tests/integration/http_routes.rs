//! Router tests: requests go through the full axum stack over an in-memory store

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use local_library::{api, store::MemoryStore, AppState};

fn app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()));
    api::router(state)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let response = app().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/catalog");
}

#[tokio::test]
async fn test_catalog_trailing_slash_redirects() {
    let response = app().oneshot(get("/catalog/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/catalog");
}

#[tokio::test]
async fn test_catalog_home_renders() {
    let response = app().oneshot(get("/catalog")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    let body = body_text(response).await;
    assert!(body.contains("Local Library Home"));
}

#[tokio::test]
async fn test_genre_create_then_detail() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_form("/catalog/genre/create", "name=Poetry"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/catalog/genre/"));

    let response = app.oneshot(get(&location)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Poetry"));
}

#[tokio::test]
async fn test_invalid_form_renders_errors() {
    let response = app()
        .oneshot(post_form("/catalog/author/create", "first_name=&family_name=Austen"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("First name must be specified."));
    assert!(body.contains("Austen"));
}

#[tokio::test]
async fn test_missing_author_is_not_found() {
    let response = app()
        .oneshot(get("/catalog/author/does-not-exist"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Author not found"));
}

#[tokio::test]
async fn test_list_pages_render() {
    let app = app();
    for uri in [
        "/catalog/authors",
        "/catalog/genres",
        "/catalog/books",
        "/catalog/bookinstances",
        "/catalog/book/create",
        "/catalog/bookinstance/create",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
    }
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");

    let response = app.oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ready");
}
