use keycloak_domain::{
    AppConfig, ClientRepository, DomainResult, GroupRepository, KeycloakClientRepository,
    KeycloakGroupRepository, KeycloakRestClient, KeycloakRoleRepository, KeycloakTokenProvider,
    KeycloakUserRepository, RoleRepository, TokenProvider, UserRepository,
};
use std::sync::Arc;

use crate::services::{ClientService, GroupService, RoleService, UserService};

/// Shared, immutable per-process state. Every request clones the service
/// handles; nothing in here is mutated after start-up.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub groups: GroupService,
    pub roles: RoleService,
    pub clients: ClientService,
}

impl AppState {
    pub fn new(
        tokens: Arc<dyn TokenProvider>,
        users: Arc<dyn UserRepository>,
        groups: Arc<dyn GroupRepository>,
        roles: Arc<dyn RoleRepository>,
        clients: Arc<dyn ClientRepository>,
    ) -> Self {
        Self {
            users: UserService::new(users, tokens.clone()),
            groups: GroupService::new(groups, tokens.clone()),
            roles: RoleService::new(roles, tokens.clone()),
            clients: ClientService::new(clients, tokens),
        }
    }

    /// Wires the Keycloak REST adapters around one shared HTTP client.
    pub fn from_config(config: &AppConfig) -> DomainResult<Self> {
        let http = config.http.build_client()?;
        let rest = KeycloakRestClient::new(config.keycloak.clone(), http);

        let clients: Arc<dyn ClientRepository> =
            Arc::new(KeycloakClientRepository::new(rest.clone()));

        Ok(Self::new(
            Arc::new(KeycloakTokenProvider::new(rest.clone())),
            Arc::new(KeycloakUserRepository::new(rest.clone())),
            Arc::new(KeycloakGroupRepository::new(rest.clone())),
            Arc::new(KeycloakRoleRepository::new(rest, clients.clone())),
            clients,
        ))
    }
}
