//! Site router tests.

use std::fs;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use kiln::serve::site_router;

async fn get(app: axum::Router, uri: &str) -> axum::http::Response<axum::body::Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_serves_nested_files_with_content_type() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), "<html>home</html>").unwrap();
    fs::create_dir_all(dir.path().join("js")).unwrap();
    fs::write(dir.path().join("js/app-init.js"), "export {};").unwrap();

    let app = site_router(dir.path());

    let response = get(app.clone(), "/js/app-init.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("javascript"));

    let response = get(app, "/index.html").await;
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"<html>home</html>");
}

#[tokio::test]
async fn test_root_serves_index() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), "<html>home</html>").unwrap();

    let app = site_router(dir.path());
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"<html>home</html>");
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let app = site_router(dir.path());

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let dir = TempDir::new().unwrap();
    let app = site_router(dir.path());

    let response = get(app, "/nope.html").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
