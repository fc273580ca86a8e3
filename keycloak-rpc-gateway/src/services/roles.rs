use keycloak_domain::{RoleRepository, TokenProvider};
use std::sync::Arc;
use tracing::{info, instrument};

use super::ServiceTokenHelper;
use crate::dto::*;
use crate::error::{Classify, RpcResult, RpcStatus};
use crate::mapper::{collect, new_role, role_reference};
use crate::{require, require_present, require_value};

/// `keycloak.RoleService`. Role mappings here are realm-level.
#[derive(Clone)]
pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
    tokens: Arc<dyn TokenProvider>,
}

impl ServiceTokenHelper for RoleService {
    fn token_provider(&self) -> &Arc<dyn TokenProvider> {
        &self.tokens
    }
}

impl RoleService {
    pub fn new(roles: Arc<dyn RoleRepository>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { roles, tokens }
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn assign_role_to_user(&self, request: UserRoleRequest) -> RpcResult<Empty> {
        require!(!request.user_id.is_empty(), "userId cannot be nil or empty");
        let role = request
            .role
            .ok_or_else(|| RpcStatus::invalid_argument("role cannot be nil"))?;
        let name = require_present!(role.name, "role name cannot be nil or empty");
        let id = require_present!(role.id, "role id cannot be nil or empty");

        let role = role_reference(id, Some(name));
        let token = self.service_token().await?;
        self.roles
            .assign_to_user(&request.user_id, &role, &token)
            .await
            .or_internal()?;

        info!("Assigned role {} to user {}", role.name, request.user_id);
        Ok(Empty {})
    }

    /// Only the role id is required; a name is forwarded when given.
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn remove_role_from_user(&self, request: UserRoleRequest) -> RpcResult<Empty> {
        require!(!request.user_id.is_empty(), "userId cannot be nil or empty");
        let role = request
            .role
            .ok_or_else(|| RpcStatus::invalid_argument("role cannot be nil or empty"))?;
        let id = require_present!(role.id, "role id cannot be nil or empty");

        let role = role_reference(id, role.name);
        let token = self.service_token().await?;
        self.roles
            .remove_from_user(&request.user_id, &role, &token)
            .await
            .or_internal()?;

        Ok(Empty {})
    }

    #[instrument(skip(self))]
    pub async fn get_user_roles(&self, request: StringValue) -> RpcResult<RolesResponse> {
        let user_id = require_value!(request.value, "userId cannot be nil or empty");

        let token = self.service_token().await?;
        let roles = self.roles.list_assigned(&user_id, &token).await.or_internal()?;

        Ok(RolesResponse {
            roles: collect(roles),
        })
    }

    #[instrument(skip(self))]
    pub async fn get_available_roles(&self, request: StringValue) -> RpcResult<RolesResponse> {
        let user_id = require_value!(request.value, "userId cannot be nil or empty");

        let token = self.service_token().await?;
        let roles = self
            .roles
            .list_available(&user_id, &token)
            .await
            .or_internal()?;

        Ok(RolesResponse {
            roles: collect(roles),
        })
    }

    #[instrument(skip(self, request))]
    pub async fn create_role(&self, request: RoleRequest) -> RpcResult<Empty> {
        let name = require_present!(request.name, "role cannot be nil or empty");

        let role = new_role(name, request.description);
        let token = self.service_token().await?;
        self.roles.create_role(&role, &token).await.or_internal()?;

        info!("Created role {}", role.name);
        Ok(Empty {})
    }
}
