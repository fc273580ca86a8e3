use keycloak_domain::{GroupRepository, GroupRepresentation, TokenProvider};
use std::sync::Arc;
use tracing::{info, instrument};

use super::ServiceTokenHelper;
use crate::dto::*;
use crate::error::{Classify, RpcResult};
use crate::mapper::{collect, role_reference};
use crate::{require, require_present, require_value};

/// `keycloak.GroupService`
#[derive(Clone)]
pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
    tokens: Arc<dyn TokenProvider>,
}

impl ServiceTokenHelper for GroupService {
    fn token_provider(&self) -> &Arc<dyn TokenProvider> {
        &self.tokens
    }
}

impl GroupService {
    pub fn new(groups: Arc<dyn GroupRepository>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { groups, tokens }
    }

    /// Creates a top-level group. The response id is empty when the backend
    /// sends no `Location` header.
    #[instrument(skip(self, request))]
    pub async fn create_group(&self, request: GroupRequest) -> RpcResult<GroupResponse> {
        let name = require_present!(request.name, "group name cannot be nil or empty");

        let group = GroupRepresentation::top_level(name);
        let token = self.service_token().await?;
        let id = self.groups.create(&group, &token).await.or_internal()?;

        info!("Created group {}", group.name);
        Ok(GroupResponse {
            id: id.unwrap_or_default(),
            name: group.name,
            path: group.path,
        })
    }

    #[instrument(skip(self, _request))]
    pub async fn get_groups_in_realm(&self, _request: Empty) -> RpcResult<GroupsResponse> {
        let token = self.service_token().await?;
        let groups = self.groups.get_all(&token).await.or_internal()?;

        Ok(GroupsResponse {
            groups: collect(groups),
        })
    }

    #[instrument(skip(self))]
    pub async fn get_group_by_id(&self, request: StringValue) -> RpcResult<GroupResponse> {
        let id = require_value!(request.value, "group id cannot be nil or empty");

        let token = self.service_token().await?;
        let group = self.groups.get_by_id(&id, &token).await.or_internal()?;

        Ok(group.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_group(&self, request: StringValue) -> RpcResult<Empty> {
        let id = require_value!(request.value, "group id cannot be nil or empty");

        let token = self.service_token().await?;
        self.groups.delete(&id, &token).await.or_internal()?;

        Ok(Empty {})
    }

    #[instrument(skip(self))]
    pub async fn get_group_members(&self, request: StringValue) -> RpcResult<UsersResponse> {
        let id = require_value!(request.value, "group id cannot be nil or empty");

        let token = self.service_token().await?;
        let members = self.groups.list_members(&id, &token).await.or_internal()?;

        Ok(UsersResponse {
            users: collect(members),
        })
    }

    #[instrument(skip(self, request), fields(group_id = %request.group_id))]
    pub async fn add_role_to_group(&self, request: RoleGroupRequest) -> RpcResult<Empty> {
        require!(!request.group_id.is_empty(), "group id cannot be nil or empty");
        let role = request.role.unwrap_or_default();
        let role_id = require_present!(role.id, "role id cannot be nil or empty");
        let role_name = require_present!(role.name, "role name cannot be nil or empty");

        let role = role_reference(role_id, Some(role_name));
        let token = self.service_token().await?;
        self.groups
            .assign_realm_role(&request.group_id, &role, &token)
            .await
            .or_internal()?;

        Ok(Empty {})
    }
}
