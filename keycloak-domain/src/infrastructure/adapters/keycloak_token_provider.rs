use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::keycloak_rest::KeycloakRestClient;
use crate::application::ports::auth::TokenProvider;
use crate::domain::{entities::AccessToken, errors::AuthError};

/// Client-credentials grant against the realm's token endpoint
pub struct KeycloakTokenProvider {
    rest: KeycloakRestClient,
}

impl KeycloakTokenProvider {
    pub fn new(rest: KeycloakRestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl TokenProvider for KeycloakTokenProvider {
    /// The response status is not inspected: an error body decodes into a
    /// token with an empty `access_token`, which the next admin call rejects.
    #[instrument(skip(self), fields(client_id = %self.rest.config().client_id))]
    async fn obtain_service_token(&self) -> Result<AccessToken, AuthError> {
        let config = self.rest.config();
        let form = [
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let response = self
            .rest
            .http()
            .post(self.rest.token_url())
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::TokenAcquisitionFailed {
                reason: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        let token: AccessToken =
            response
                .json()
                .await
                .map_err(|e| AuthError::TokenAcquisitionFailed {
                    reason: format!("Failed to parse token response: {e}"),
                })?;

        if token.is_error() {
            warn!(
                status = status.as_u16(),
                error = %token.error,
                description = %token.error_description,
                "token endpoint returned an error body"
            );
        } else {
            debug!(expires_in = token.expires_in, "service token obtained");
        }

        Ok(token)
    }
}
