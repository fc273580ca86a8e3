use crate::domain::{entities::AccessToken, errors::AuthError};
use async_trait::async_trait;

/// Source of the service-level token used for every admin call.
///
/// Implementations mint a fresh token per call; nothing is cached.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn obtain_service_token(&self) -> Result<AccessToken, AuthError>;
}
