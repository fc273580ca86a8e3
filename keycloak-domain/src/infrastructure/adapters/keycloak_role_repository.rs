use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use std::sync::Arc;
use tracing::{info, instrument};

use super::keycloak_rest::KeycloakRestClient;
use crate::application::ports::repository::{ClientRepository, RoleRepository};
use crate::domain::{entities::*, errors::*};

/// Realm role mappings, plus role creation under the gateway's own client,
/// which needs the client's generated id from `clients`.
pub struct KeycloakRoleRepository {
    rest: KeycloakRestClient,
    clients: Arc<dyn ClientRepository>,
}

impl KeycloakRoleRepository {
    pub fn new(rest: KeycloakRestClient, clients: Arc<dyn ClientRepository>) -> Self {
        Self { rest, clients }
    }

    fn realm_mappings(user_id: &str) -> [&str; 4] {
        ["users", user_id, "role-mappings", "realm"]
    }
}

#[async_trait]
impl RoleRepository for KeycloakRoleRepository {
    #[instrument(skip(self, role, token), fields(role = %role.name))]
    async fn assign_to_user(
        &self,
        user_id: &str,
        role: &RoleRepresentation,
        token: &str,
    ) -> DomainResult<()> {
        let request = self
            .rest
            .admin(Method::POST, &Self::realm_mappings(user_id), token)?
            .json(&[role]);
        self.rest
            .execute("assign role to user", request, StatusCode::NO_CONTENT)
            .await?;

        info!("Assigned role {} to user {}", role.name, user_id);
        Ok(())
    }

    #[instrument(skip(self, role, token), fields(role = %role.name))]
    async fn remove_from_user(
        &self,
        user_id: &str,
        role: &RoleRepresentation,
        token: &str,
    ) -> DomainResult<()> {
        let request = self
            .rest
            .admin(Method::DELETE, &Self::realm_mappings(user_id), token)?
            .json(&[role]);
        self.rest
            .execute("remove role from user", request, StatusCode::NO_CONTENT)
            .await?;

        info!("Removed role {} from user {}", role.name, user_id);
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn list_assigned(
        &self,
        user_id: &str,
        token: &str,
    ) -> DomainResult<Vec<RoleRepresentation>> {
        let request = self
            .rest
            .admin(Method::GET, &Self::realm_mappings(user_id), token)?;
        self.rest.fetch("get user roles", request).await
    }

    #[instrument(skip(self, token))]
    async fn list_available(
        &self,
        user_id: &str,
        token: &str,
    ) -> DomainResult<Vec<RoleRepresentation>> {
        let request = self.rest.admin(
            Method::GET,
            &["users", user_id, "role-mappings", "realm", "available"],
            token,
        )?;
        self.rest.fetch("get available roles", request).await
    }

    #[instrument(skip(self, role, token), fields(role = %role.name))]
    async fn create_role(&self, role: &RoleRepresentation, token: &str) -> DomainResult<()> {
        let owner = self
            .clients
            .get_by_client_id(&self.rest.config().client_id, token)
            .await?;

        let request = self
            .rest
            .admin(Method::POST, &["clients", owner.id.as_str(), "roles"], token)?
            .json(role);
        self.rest
            .execute("create role", request, StatusCode::CREATED)
            .await?;

        info!("Created role {} under client {}", role.name, owner.client_id);
        Ok(())
    }
}
