mod common;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zerobug_notifier::api::{ADMIN_KEY_HEADER, router};
use zerobug_notifier::secret::SecretToken;
use zerobug_notifier::{AppState, CredentialsConfig, NotifyConfig, ZeroBugConfig};

use common::{REQUEST_PATH, SITES_PATH, endpoints};

fn app(server: &MockServer, default_token: Option<&str>) -> Router {
    let config = ZeroBugConfig {
        endpoints: endpoints(&server.uri()),
        credentials: CredentialsConfig {
            default_token: default_token.map(SecretToken::new),
            admin_key: Some(SecretToken::new("admin")),
        },
        notify: NotifyConfig::default(),
        log: None,
    };
    router(Arc::new(AppState::new(config, 8).unwrap()))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_build(payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/builds")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn completed_build_is_notified_and_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REQUEST_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let app = app(&server, None);

    let response = app
        .clone()
        .oneshot(post_build(json!({
            "build_url": "job/demo/1/",
            "result": "success",
            "token": "per-build-secret",
            "website": "http://www.java.com"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let build = body_json(response).await;
    assert_eq!(build["failed"], false);
    assert_eq!(build["actions"][0]["token"], "****");
    assert_eq!(build["actions"][0]["identifier"].as_str().unwrap().len(), 32);
    assert!(!build.to_string().contains("per-build-secret"));

    let id = build["id"].as_str().unwrap();
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/builds/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], id);
}

#[tokio::test]
async fn default_token_is_used_when_build_sends_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REQUEST_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server, Some("global"))
        .oneshot(post_build(json!({
            "build_url": "job/demo/2/",
            "result": "success",
            "website": "http://www.java.com"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_and_website_fail_the_build() {
    let server = MockServer::start().await;
    let response = app(&server, None)
        .oneshot(post_build(json!({
            "build_url": "job/demo/3/",
            "result": "success"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let build = body_json(response).await;
    assert_eq!(build["failed"], true);
    assert_eq!(build["failure_reasons"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_build_is_404() {
    let server = MockServer::start().await;
    let response = app(&server, None)
        .oneshot(
            Request::builder()
                .uri("/builds/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_routes_require_the_admin_key() {
    let server = MockServer::start().await;
    let response = app(&server, None)
        .oneshot(
            Request::builder()
                .uri("/admin/validate")
                .header(ADMIN_KEY_HEADER, "wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_validate_reports_service_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SITES_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let response = app(&server, None)
        .oneshot(
            Request::builder()
                .uri("/admin/validate")
                .header(ADMIN_KEY_HEADER, "admin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let validation = body_json(response).await;
    assert_eq!(validation["kind"], "error");
    assert!(validation["message"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn token_field_check() {
    let server = MockServer::start().await;
    let response = app(&server, None)
        .oneshot(
            Request::builder()
                .uri("/check/token?value=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let validation = body_json(response).await;
    assert_eq!(validation["kind"], "error");
    assert_eq!(validation["message"], "Please set a ZeroBug token");
}
