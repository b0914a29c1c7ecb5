use std::time::Duration;

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, router, Behavior, MockState, PruneOutput};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn health_request() -> Request<String> {
    Request::builder().uri("/").body(String::new()).unwrap()
}

// --- health ---

#[tokio::test]
async fn health_returns_200() {
    let resp = app().oneshot(health_request()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn scripted_status_applies_to_health() {
    let state = MockState::new(Behavior::Respond {
        status: 503,
        body: String::new(),
    });
    let resp = router(state).oneshot(health_request()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// --- prune ---

#[tokio::test]
async fn prune_keeps_matching_lines() {
    let resp = app()
        .oneshot(json_request(
            "/prune",
            r#"{"code":"fn login() {}\nfn logout() {}\nfn render() {}","query":"login flow","threshold":0.7}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let out: PruneOutput = body_json(resp).await;
    assert_eq!(out.pruned_code, "fn login() {}");
    assert_eq!(out.original_lines, 3);
    assert_eq!(out.pruned_lines, 1);
}

#[tokio::test]
async fn prune_missing_fields_returns_422() {
    let resp = app()
        .oneshot(json_request("/prune", r#"{"code":"x"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn prune_get_is_not_allowed() {
    let resp = app()
        .oneshot(Request::builder().uri("/prune").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn scripted_response_is_returned_verbatim() {
    let state = MockState::new(Behavior::Respond {
        status: 200,
        body: "not json".to_string(),
    });
    let resp = router(state.clone())
        .oneshot(json_request("/prune", r#"{"code":"x","query":"y","threshold":0.5}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "not json");
    assert_eq!(state.prune_hits(), 1);
}

#[tokio::test]
async fn delayed_response_still_prunes() {
    let state = MockState::new(Behavior::Delay(Duration::from_millis(20)));
    let resp = router(state)
        .oneshot(json_request("/prune", r#"{"code":"alpha\nbeta","query":"beta","threshold":0.5}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let out: PruneOutput = body_json(resp).await;
    assert_eq!(out.pruned_code, "beta");
}

#[tokio::test]
async fn health_does_not_count_as_prune_hit() {
    let state = MockState::new(Behavior::Prune);
    let resp = router(state.clone()).oneshot(health_request()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.prune_hits(), 0);
}
