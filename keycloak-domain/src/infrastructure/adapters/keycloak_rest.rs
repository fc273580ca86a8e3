use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::application::ports::config::KeycloakConfig;
use crate::domain::errors::*;

/// HTTP plumbing shared by the Keycloak adapters: endpoint construction,
/// bearer authorisation and the expected-status check.
///
/// Cloning is cheap; the underlying `reqwest::Client` is reference counted.
#[derive(Clone, Debug)]
pub struct KeycloakRestClient {
    config: KeycloakConfig,
    http: reqwest::Client,
}

impl KeycloakRestClient {
    pub fn new(config: KeycloakConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &KeycloakConfig {
        &self.config
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Admin endpoint below `/admin/realms/{realm}`. Each element of
    /// `segments` becomes exactly one path segment: `/`, `?`, `#` and `%`
    /// are percent-encoded, and empty or dot-only segments are refused.
    pub fn admin_url(&self, segments: &[&str]) -> DomainResult<Url> {
        if let Some(segment) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(DomainError::Validation {
                field: "path".to_string(),
                message: format!("'{segment}' is not a valid resource identifier"),
            });
        }

        let mut url = Url::parse(&self.config.url).map_err(|e| DomainError::Configuration {
            message: format!("invalid Keycloak URL {}: {e}", self.config.url),
        })?;
        url.path_segments_mut()
            .map_err(|_| DomainError::Configuration {
                message: format!("Keycloak URL {} cannot carry a path", self.config.url),
            })?
            .pop_if_empty()
            .extend(["admin", "realms", self.config.realm.as_str()])
            .extend(segments);

        Ok(url)
    }

    pub fn token_url(&self) -> String {
        self.config.get_token_url()
    }

    /// An admin API request carrying the inbound call's bearer token.
    pub fn admin(
        &self,
        method: Method,
        segments: &[&str],
        token: &str,
    ) -> DomainResult<RequestBuilder> {
        let url = self.admin_url(segments)?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Sends `request` and accepts exactly `expected`.
    ///
    /// On any other status the body is read (best effort) and carried in the
    /// error together with the status text.
    pub async fn execute(
        &self,
        operation: &str,
        request: RequestBuilder,
        expected: StatusCode,
    ) -> DomainResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(operation, error = %e, "Keycloak request failed");
            DomainError::Transport {
                operation: operation.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if status != expected {
            let body = response.text().await.unwrap_or_default();
            warn!(
                operation,
                status = status.as_u16(),
                expected = expected.as_u16(),
                "unexpected status from Keycloak"
            );
            return Err(DomainError::UnexpectedStatus {
                operation: operation.to_string(),
                status: status.as_u16(),
                status_text: status.to_string(),
                body,
            });
        }

        debug!(operation, status = status.as_u16(), "Keycloak request succeeded");
        Ok(response)
    }

    /// `execute` expecting 200, then decode the JSON body.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> DomainResult<T> {
        let response = self.execute(operation, request, StatusCode::OK).await?;
        read_json(operation, response).await
    }
}

/// Decode a response body, keeping transport and decoding failures apart.
pub async fn read_json<T: DeserializeOwned>(operation: &str, response: Response) -> DomainResult<T> {
    let bytes = response.bytes().await.map_err(|e| DomainError::Transport {
        operation: operation.to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_slice(&bytes).map_err(|e| DomainError::Decode {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}
