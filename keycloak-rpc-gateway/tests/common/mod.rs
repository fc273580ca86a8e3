#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use httpmock::prelude::*;
use httpmock::Mock;
use keycloak_domain::{AppConfig, KeycloakConfig};
use keycloak_rpc_gateway::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const REALM: &str = "demo";
pub const CLIENT_ID: &str = "gateway";
pub const CLIENT_SECRET: &str = "s3cret";
pub const TOKEN: &str = "service-token";
pub const BEARER: &str = "Bearer service-token";

pub fn admin_path(path: &str) -> String {
    format!("/admin/realms/{REALM}{path}")
}

pub fn token_path() -> String {
    format!("/realms/{REALM}/protocol/openid-connect/token")
}

/// The gateway wired to Keycloak adapters pointing at `server`
pub fn app(server: &MockServer) -> Router {
    let config = AppConfig::new(KeycloakConfig::new(
        server.base_url(),
        REALM,
        CLIENT_ID,
        CLIENT_SECRET,
    ));
    router(AppState::from_config(&config).unwrap())
}

/// Client-credentials grant answering with `TOKEN`
pub async fn mock_service_token(server: &MockServer) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(token_path())
                .x_www_form_urlencoded_tuple("grant_type", "client_credentials");
            then.status(200).json_body(json!({
                "access_token": TOKEN,
                "expires_in": 300,
                "token_type": "Bearer"
            }));
        })
        .await
}

/// Any admin API call
pub async fn mock_any_admin(server: &MockServer) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.path_contains("/admin/realms/");
            then.status(500);
        })
        .await
}

/// POSTs `body` to `path` and returns the status and decoded JSON body.
pub async fn call(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    call_raw(app, path, body.to_string()).await
}

pub async fn call_raw(app: Router, path: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
