use async_trait::async_trait;
use reqwest::{header::LOCATION, Method, StatusCode};
use tracing::{info, instrument};

use super::keycloak_rest::KeycloakRestClient;
use crate::application::ports::repository::GroupRepository;
use crate::domain::{entities::*, errors::*};

pub struct KeycloakGroupRepository {
    rest: KeycloakRestClient,
}

impl KeycloakGroupRepository {
    pub fn new(rest: KeycloakRestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl GroupRepository for KeycloakGroupRepository {
    #[instrument(skip(self, group, token), fields(name = %group.name))]
    async fn create(&self, group: &GroupRepresentation, token: &str) -> DomainResult<Option<String>> {
        let request = self.rest.admin(Method::POST, &["groups"], token)?.json(group);
        let response = self
            .rest
            .execute("create group", request, StatusCode::CREATED)
            .await?;

        let id = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(id_from_location);

        info!("Created group {} ({:?})", group.name, id);
        Ok(id)
    }

    #[instrument(skip(self, token))]
    async fn get_all(&self, token: &str) -> DomainResult<Vec<GroupRepresentation>> {
        let request = self.rest.admin(Method::GET, &["groups"], token)?;
        self.rest.fetch("get groups", request).await
    }

    #[instrument(skip(self, token))]
    async fn get_by_id(&self, id: &str, token: &str) -> DomainResult<GroupRepresentation> {
        let request = self.rest.admin(Method::GET, &["groups", id], token)?;
        self.rest.fetch("get group", request).await
    }

    #[instrument(skip(self, token))]
    async fn delete(&self, id: &str, token: &str) -> DomainResult<()> {
        let request = self.rest.admin(Method::DELETE, &["groups", id], token)?;
        self.rest
            .execute("delete group", request, StatusCode::NO_CONTENT)
            .await?;

        info!("Deleted group {}", id);
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn list_members(&self, id: &str, token: &str) -> DomainResult<Vec<UserRepresentation>> {
        let request = self
            .rest
            .admin(Method::GET, &["groups", id, "members"], token)?;
        self.rest.fetch("get group members", request).await
    }

    #[instrument(skip(self, role, token), fields(role = %role.name))]
    async fn assign_realm_role(
        &self,
        group_id: &str,
        role: &RoleRepresentation,
        token: &str,
    ) -> DomainResult<()> {
        let request = self
            .rest
            .admin(
                Method::POST,
                &["groups", group_id, "role-mappings", "realm"],
                token,
            )?
            .json(&[role]);
        self.rest
            .execute("add role to group", request, StatusCode::NO_CONTENT)
            .await?;

        info!("Assigned role {} to group {}", role.name, group_id);
        Ok(())
    }
}
