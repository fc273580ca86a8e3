use keycloak_domain::{ClientRepository, TokenProvider};
use std::sync::Arc;
use tracing::instrument;

use super::ServiceTokenHelper;
use crate::dto::*;
use crate::error::{Classify, RpcResult};
use crate::mapper::collect;
use crate::{require, require_value};

/// `keycloak.ClientService`. Read-only.
#[derive(Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientRepository>,
    tokens: Arc<dyn TokenProvider>,
}

impl ServiceTokenHelper for ClientService {
    fn token_provider(&self) -> &Arc<dyn TokenProvider> {
        &self.tokens
    }
}

impl ClientService {
    pub fn new(clients: Arc<dyn ClientRepository>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { clients, tokens }
    }

    #[instrument(skip(self, _request))]
    pub async fn get_clients(&self, _request: Empty) -> RpcResult<ClientsResponse> {
        let token = self.service_token().await?;
        let clients = self.clients.get_all(&token).await.or_internal()?;

        Ok(ClientsResponse {
            clients: collect(clients),
        })
    }

    #[instrument(skip(self))]
    pub async fn get_client_by_client_id(&self, request: StringValue) -> RpcResult<ClientResponse> {
        let client_id = require_value!(request.value, "clientId cannot be nil or empty");

        let token = self.service_token().await?;
        let client = self
            .clients
            .get_by_client_id(&client_id, &token)
            .await
            .or_internal()?;

        Ok(client.into())
    }

    #[instrument(skip(self))]
    pub async fn get_client_by_id(&self, request: StringValue) -> RpcResult<ClientResponse> {
        let id = require_value!(request.value, "id cannot be nil or empty");

        let token = self.service_token().await?;
        let client = self.clients.get_by_id(&id, &token).await.or_internal()?;

        Ok(client.into())
    }

    #[instrument(skip(self, request), fields(count = request.requests.len()))]
    pub async fn get_clients_by_ids(&self, request: StringsRequest) -> RpcResult<ClientsResponse> {
        require!(!request.requests.is_empty(), "ids cannot be nil or empty");

        let token = self.service_token().await?;
        let clients = self
            .clients
            .get_by_ids(&request.requests, &token)
            .await
            .or_internal()?;

        Ok(ClientsResponse {
            clients: collect(clients),
        })
    }

    #[instrument(skip(self, request), fields(count = request.requests.len()))]
    pub async fn get_clients_by_client_ids(
        &self,
        request: StringsRequest,
    ) -> RpcResult<ClientsResponse> {
        require!(!request.requests.is_empty(), "clientIds cannot be nil or empty");

        let token = self.service_token().await?;
        let clients = self
            .clients
            .get_by_client_ids(&request.requests, &token)
            .await
            .or_internal()?;

        Ok(ClientsResponse {
            clients: collect(clients),
        })
    }
}
