use keycloak_domain::{TokenProvider, UserPatch, UserRepository, UserRepresentation};
use std::sync::Arc;
use tracing::{info, instrument};

use super::ServiceTokenHelper;
use crate::dto::*;
use crate::error::{Classify, RpcResult};
use crate::mapper::collect;
use crate::{require, require_present, require_value};

/// `keycloak.UserService`
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenProvider>,
}

impl ServiceTokenHelper for UserService {
    fn token_provider(&self) -> &Arc<dyn TokenProvider> {
        &self.tokens
    }
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { users, tokens }
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_user(&self, request: UserRequest) -> RpcResult<Empty> {
        require!(!request.username.is_empty(), "username cannot be nil or empty");

        let user = UserRepresentation::from(request);
        let token = self.service_token().await?;
        self.users.create(&user, &token).await.or_internal()?;

        Ok(Empty {})
    }

    /// Fetch, merge, then write back the full representation.
    #[instrument(skip(self, request), fields(user_id = %request.pid))]
    pub async fn update_user(&self, request: UpdateUserRequest) -> RpcResult<Empty> {
        require!(!request.pid.is_empty(), "user pid cannot be nil or empty");

        let token = self.service_token().await?;
        let mut user = self
            .users
            .get_by_id(&request.pid, &token)
            .await
            .or_not_found()?;

        user.apply(UserPatch::from(request));
        self.users.update(&user, &token).await.or_internal()?;

        Ok(Empty {})
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_id(&self, request: StringValue) -> RpcResult<UserResponse> {
        let id = require_value!(request.value, "id cannot be nil or empty");

        let token = self.service_token().await?;
        let user = self.users.get_by_id(&id, &token).await.or_not_found()?;

        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_username(&self, request: StringValue) -> RpcResult<UserResponse> {
        let username = require_value!(request.value, "username cannot be nil or empty");

        let token = self.service_token().await?;
        let user = self
            .users
            .get_by_username(&username, &token)
            .await
            .or_not_found()?;

        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, request: StringValue) -> RpcResult<Empty> {
        let id = require_value!(request.value, "id cannot be nil or empty");

        let token = self.service_token().await?;
        self.users.delete(&id, &token).await.or_internal()?;

        Ok(Empty {})
    }

    #[instrument(skip(self))]
    pub async fn add_user_to_group(&self, request: UserGroupRequest) -> RpcResult<Empty> {
        require!(!request.user_id.is_empty(), "userId cannot be nil or empty");
        require!(!request.group_id.is_empty(), "groupId cannot be nil or empty");

        let token = self.service_token().await?;
        self.users
            .add_to_group(&request.user_id, &request.group_id, &token)
            .await
            .or_internal()?;

        Ok(Empty {})
    }

    #[instrument(skip(self))]
    pub async fn remove_user_from_group(&self, request: UserGroupRequest) -> RpcResult<Empty> {
        require!(!request.user_id.is_empty(), "userId cannot be nil or empty");
        require!(!request.group_id.is_empty(), "groupId cannot be nil or empty");

        let token = self.service_token().await?;
        self.users
            .remove_from_group(&request.user_id, &request.group_id, &token)
            .await
            .or_internal()?;

        Ok(Empty {})
    }

    /// Password grant for an end user. Needs no service token.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn authenticate(&self, request: AuthenticateRequest) -> RpcResult<AccessTokenResponse> {
        require!(!request.password.is_empty(), "password cannot be nil or empty");
        require!(!request.username.is_empty(), "username cannot be nil or empty");
        let client_id = require_present!(request.client_id, "client id cannot be nil or empty");
        require!(
            request.client_secret.as_ref().map_or(true, |s| !s.is_empty()),
            "client secret cannot be nil or empty"
        );

        let token = self
            .users
            .authenticate(
                &request.username,
                &request.password,
                &client_id,
                request.client_secret.as_deref(),
            )
            .await
            .or_internal()?;

        Ok(token.into())
    }

    #[instrument(skip(self, _request))]
    pub async fn get_all_users(&self, _request: Empty) -> RpcResult<UsersResponse> {
        let token = self.service_token().await?;
        let users = self.users.get_all(&token).await.or_internal()?;

        info!("Listed {} users", users.len());
        Ok(UsersResponse {
            users: collect(users),
        })
    }

    #[instrument(skip(self, request), fields(count = request.requests.len()))]
    pub async fn get_users_by_ids(&self, request: StringsRequest) -> RpcResult<UsersResponse> {
        require!(!request.requests.is_empty(), "userIds cannot be nil or empty");

        let token = self.service_token().await?;
        let users = self
            .users
            .get_by_ids(&request.requests, &token)
            .await
            .or_internal()?;

        Ok(UsersResponse {
            users: collect(users),
        })
    }

    #[instrument(skip(self, request), fields(count = request.requests.len()))]
    pub async fn get_users_by_usernames(&self, request: StringsRequest) -> RpcResult<UsersResponse> {
        require!(!request.requests.is_empty(), "usernames cannot be nil or empty");

        let token = self.service_token().await?;
        let users = self
            .users
            .get_by_usernames(&request.requests, &token)
            .await
            .or_internal()?;

        Ok(UsersResponse {
            users: collect(users),
        })
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn set_user_password(&self, request: PasswordRequest) -> RpcResult<BoolValue> {
        require!(!request.user_id.is_empty(), "user id cannot be nil or empty");
        require!(!request.password.is_empty(), "password cannot be nil or empty");

        let token = self.service_token().await?;
        let value = self
            .users
            .set_password(&request.user_id, &request.password, request.temporary, &token)
            .await
            .or_internal()?;

        Ok(BoolValue { value })
    }
}
