pub mod clients;
pub mod groups;
pub mod roles;
pub mod users;

pub use clients::ClientService;
pub use groups::GroupService;
pub use roles::RoleService;
pub use users::UserService;

use crate::error::RpcResult;
use async_trait::async_trait;
use keycloak_domain::TokenProvider;
use std::sync::Arc;

/// Shared service-token acquisition for every RPC service group
#[async_trait]
pub trait ServiceTokenHelper: Send + Sync {
    fn token_provider(&self) -> &Arc<dyn TokenProvider>;

    /// A fresh bearer token for this call. Failures surface as
    /// `UNAUTHENTICATED`.
    async fn service_token(&self) -> RpcResult<String> {
        let token = self.token_provider().obtain_service_token().await?;
        Ok(token.access_token)
    }
}
