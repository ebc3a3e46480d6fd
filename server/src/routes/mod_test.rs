use super::*;
use crate::state::test_helpers::{self, CannedLlm, MockIdentity};
use axum::body::Body;
use axum::http::{Method, Request, header};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let resp = router
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn healthz_ok() {
    let (status, _) = send(app(test_helpers::test_app_state()), Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn auto_confirm_route_is_mounted() {
    let router = app(test_helpers::test_app_state());
    let (status, bytes) = send(
        router,
        Method::POST,
        "/functions/v1/auto-confirm-signup",
        Some(json!({ "user": { "id": "abc" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "message": "User email confirmed automatically" }));
}

#[tokio::test]
async fn name_generator_route_is_mounted() {
    let llm = CannedLlm(Ok(r#"{"names":["Acme"]}"#.into()));
    let router = app(test_helpers::test_app_state_with(MockIdentity::ok(), Some(llm)));
    let (status, bytes) = send(
        router,
        Method::POST,
        "/functions/v1/groq-name-generator",
        Some(json!({ "generatorType": "business", "systemPrompt": "s", "userPrompt": "u" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "names": ["Acme"] }));
}

#[tokio::test]
async fn function_routes_reject_get() {
    let router = app(test_helpers::test_app_state());
    let (status, _) = send(router, Method::GET, "/functions/v1/auto-confirm-signup", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn json_content_type_on_failure() {
    let router = app(test_helpers::test_app_state());
    let req = Request::builder()
        .method(Method::POST)
        .uri("/functions/v1/auto-confirm-signup")
        .body(Body::from("{}"))
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "application/json");
}

#[tokio::test]
async fn panic_response_is_bad_request_with_message() {
    let resp = panic_response(Box::new("kaboom"));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "kaboom" }));
}

#[test]
fn panic_response_handles_owned_and_opaque_payloads() {
    let resp = panic_response(Box::new(String::from("owned")));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp = panic_response(Box::new(42_u8));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
