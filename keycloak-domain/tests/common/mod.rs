#![allow(dead_code)]

use httpmock::MockServer;
use keycloak_domain::{KeycloakConfig, KeycloakRestClient};

pub const REALM: &str = "demo";
pub const CLIENT_ID: &str = "gateway";
pub const CLIENT_SECRET: &str = "s3cret";
pub const TOKEN: &str = "service-token";
pub const BEARER: &str = "Bearer service-token";

pub fn config(server: &MockServer) -> KeycloakConfig {
    KeycloakConfig::new(server.base_url(), REALM, CLIENT_ID, CLIENT_SECRET)
}

pub fn rest_client(server: &MockServer) -> KeycloakRestClient {
    KeycloakRestClient::new(config(server), reqwest::Client::new())
}

/// Nothing listens on port 1, so requests fail before any response.
pub fn unreachable_rest_client() -> KeycloakRestClient {
    KeycloakRestClient::new(
        KeycloakConfig::new("http://127.0.0.1:1", REALM, CLIENT_ID, CLIENT_SECRET),
        reqwest::Client::new(),
    )
}

pub fn admin_path(path: &str) -> String {
    format!("/admin/realms/{REALM}{path}")
}

pub fn token_path() -> String {
    format!("/realms/{REALM}/protocol/openid-connect/token")
}

pub fn keys(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
