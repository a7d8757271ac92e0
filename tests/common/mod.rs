// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mergington_activities::config::Config;
use mergington_activities::routes::create_router;
use mergington_activities::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Every activity in the seed catalog, in catalog order.
#[allow(dead_code)]
pub const SEEDED_ACTIVITIES: [&str; 9] = [
    "Chess Club",
    "Programming Class",
    "Gym Class",
    "Soccer Team",
    "Basketball Club",
    "Art Club",
    "Drama Club",
    "Debate Team",
    "Math Club",
];

/// Create a test app backed by the embedded seed catalog.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(Config::test_default())
}

/// Create a test app from an explicit config.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::from_config(config).expect("Seed catalog should load"));
    (create_router(state.clone()), state)
}

/// Path for an activity, with the name percent-encoded.
#[allow(dead_code)]
pub fn activity_path(name: &str) -> String {
    format!("/activities/{}", urlencoding::encode(name))
}

/// Path for a signup/unregister action with the email query parameter.
#[allow(dead_code)]
pub fn membership_path(name: &str, action: &str, email: &str) -> String {
    format!(
        "{}/{}?email={}",
        activity_path(name),
        action,
        urlencoding::encode(email)
    )
}

/// Send a request and decode the JSON body.
#[allow(dead_code)]
pub async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Current participants of an activity, fetched through the API.
#[allow(dead_code)]
pub async fn participants(app: &Router, name: &str) -> Vec<String> {
    let (status, json) = send(app, "GET", &activity_path(name)).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(json["participants"].clone()).unwrap()
}
