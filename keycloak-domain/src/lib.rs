/*!
# Keycloak Domain

Adapter layer between the RPC gateway and the Keycloak admin REST API.

- `domain`: backend representations (users, groups, roles, clients, tokens),
  the error taxonomy and multi-key lookup helpers
- `application::ports`: the traits the gateway depends on
  (`TokenProvider`, the four entity repositories, `ConfigurationPort`)
- `infrastructure::adapters`: the reqwest-backed implementations

```text
 RPC services ──► TokenProvider ──► POST /realms/{realm}/protocol/openid-connect/token
      │
      └────────► *Repository ────► /admin/realms/{realm}/{users|groups|clients}/...
                      │
                      └─ RoleRepository ──► ClientRepository (CreateRole)
```

## Usage

```rust,no_run
use keycloak_domain::{
    AppConfig, KeycloakClientRepository, KeycloakRestClient, KeycloakTokenProvider,
    ClientRepository, TokenProvider,
};

# async fn run() -> Result<(), Box<dyn std::error::Error>> {
let config = AppConfig::from_env()?;
let rest = KeycloakRestClient::new(config.keycloak.clone(), config.http.build_client()?);

let token = KeycloakTokenProvider::new(rest.clone()).obtain_service_token().await?;
let clients = KeycloakClientRepository::new(rest)
    .get_all(&token.access_token)
    .await?;
# Ok(())
# }
```
*/

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::ports::*;
pub use domain::entities::*;
pub use domain::errors::*;
pub use infrastructure::adapters::*;
