use crate::domain::{entities::*, errors::DomainResult};
use async_trait::async_trait;

/// User operations against the realm's `/users` resources.
///
/// Every method takes the bearer token of the inbound call.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &UserRepresentation, token: &str) -> DomainResult<()>;

    /// Full-representation PUT. Callers merge onto a freshly fetched record.
    async fn update(&self, user: &UserRepresentation, token: &str) -> DomainResult<()>;

    async fn get_by_id(&self, id: &str, token: &str) -> DomainResult<UserRepresentation>;

    /// First match of the backend's `username` search; none is `NotFound`.
    async fn get_by_username(
        &self,
        username: &str,
        token: &str,
    ) -> DomainResult<UserRepresentation>;

    async fn get_all(&self, token: &str) -> DomainResult<Vec<UserRepresentation>>;

    /// Missing ids are skipped.
    async fn get_by_ids(
        &self,
        ids: &[String],
        token: &str,
    ) -> DomainResult<Vec<UserRepresentation>>;

    /// Missing usernames yield a default record in their slot.
    async fn get_by_usernames(
        &self,
        usernames: &[String],
        token: &str,
    ) -> DomainResult<Vec<UserRepresentation>>;

    async fn delete(&self, id: &str, token: &str) -> DomainResult<()>;

    async fn add_to_group(&self, user_id: &str, group_id: &str, token: &str) -> DomainResult<()>;

    async fn remove_from_group(
        &self,
        user_id: &str,
        group_id: &str,
        token: &str,
    ) -> DomainResult<()>;

    /// Password grant on behalf of an end user. `client_secret` is sent only
    /// for confidential clients.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
        client_id: &str,
        client_secret: Option<&str>,
    ) -> DomainResult<AccessToken>;

    async fn set_password(
        &self,
        id: &str,
        password: &str,
        temporary: bool,
        token: &str,
    ) -> DomainResult<bool>;
}

#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Returns the new group's id when the backend reports one.
    async fn create(&self, group: &GroupRepresentation, token: &str) -> DomainResult<Option<String>>;

    async fn get_all(&self, token: &str) -> DomainResult<Vec<GroupRepresentation>>;

    async fn get_by_id(&self, id: &str, token: &str) -> DomainResult<GroupRepresentation>;

    async fn delete(&self, id: &str, token: &str) -> DomainResult<()>;

    async fn list_members(&self, id: &str, token: &str) -> DomainResult<Vec<UserRepresentation>>;

    async fn assign_realm_role(
        &self,
        group_id: &str,
        role: &RoleRepresentation,
        token: &str,
    ) -> DomainResult<()>;
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn assign_to_user(
        &self,
        user_id: &str,
        role: &RoleRepresentation,
        token: &str,
    ) -> DomainResult<()>;

    async fn remove_from_user(
        &self,
        user_id: &str,
        role: &RoleRepresentation,
        token: &str,
    ) -> DomainResult<()>;

    async fn list_assigned(
        &self,
        user_id: &str,
        token: &str,
    ) -> DomainResult<Vec<RoleRepresentation>>;

    async fn list_available(
        &self,
        user_id: &str,
        token: &str,
    ) -> DomainResult<Vec<RoleRepresentation>>;

    /// Creates the role under the gateway's own client.
    async fn create_role(&self, role: &RoleRepresentation, token: &str) -> DomainResult<()>;
}

/// Client lookups. All of them list the realm's clients and filter in memory.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn get_all(&self, token: &str) -> DomainResult<Vec<ClientRepresentation>>;

    /// Exact match on the generated id.
    async fn get_by_id(&self, id: &str, token: &str) -> DomainResult<ClientRepresentation>;

    /// Case-insensitive match on the human client id.
    async fn get_by_client_id(
        &self,
        client_id: &str,
        token: &str,
    ) -> DomainResult<ClientRepresentation>;

    async fn get_by_ids(
        &self,
        ids: &[String],
        token: &str,
    ) -> DomainResult<Vec<ClientRepresentation>>;

    async fn get_by_client_ids(
        &self,
        client_ids: &[String],
        token: &str,
    ) -> DomainResult<Vec<ClientRepresentation>>;
}
