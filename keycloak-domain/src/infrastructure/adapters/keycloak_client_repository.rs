use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

use super::keycloak_rest::KeycloakRestClient;
use crate::application::ports::repository::ClientRepository;
use crate::domain::{entities::*, errors::*, lookup};

/// Client lookups over the full `/clients` listing. The admin API only
/// filters by exact `clientId`, so every variant lists and filters locally.
pub struct KeycloakClientRepository {
    rest: KeycloakRestClient,
}

impl KeycloakClientRepository {
    pub fn new(rest: KeycloakRestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl ClientRepository for KeycloakClientRepository {
    #[instrument(skip(self, token))]
    async fn get_all(&self, token: &str) -> DomainResult<Vec<ClientRepresentation>> {
        let request = self.rest.admin(Method::GET, &["clients"], token)?;
        self.rest.fetch("get clients", request).await
    }

    #[instrument(skip(self, token))]
    async fn get_by_id(&self, id: &str, token: &str) -> DomainResult<ClientRepresentation> {
        self.get_all(token)
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::not_found("client", id))
    }

    #[instrument(skip(self, token))]
    async fn get_by_client_id(
        &self,
        client_id: &str,
        token: &str,
    ) -> DomainResult<ClientRepresentation> {
        self.get_all(token)
            .await?
            .into_iter()
            .find(|c| c.client_id_matches(client_id))
            .ok_or_else(|| DomainError::not_found("client", client_id))
    }

    #[instrument(skip(self, token), fields(count = ids.len()))]
    async fn get_by_ids(
        &self,
        ids: &[String],
        token: &str,
    ) -> DomainResult<Vec<ClientRepresentation>> {
        let clients = self.get_all(token).await?;
        Ok(lookup::select_or_default(clients, ids, |c| c.id.as_str()))
    }

    #[instrument(skip(self, token), fields(count = client_ids.len()))]
    async fn get_by_client_ids(
        &self,
        client_ids: &[String],
        token: &str,
    ) -> DomainResult<Vec<ClientRepresentation>> {
        let clients = self.get_all(token).await?;
        Ok(lookup::select_or_default(clients, client_ids, |c| {
            c.client_id.as_str()
        }))
    }
}
