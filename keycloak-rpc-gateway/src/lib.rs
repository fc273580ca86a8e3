//! JSON-over-HTTP RPC gateway for administering one Keycloak realm.
//!
//! Four service groups (`UserService`, `GroupService`, `RoleService`,
//! `ClientService`) are exposed as `POST /keycloak.{Service}/{Method}`. Each
//! call validates its request, obtains a fresh service token, then talks to
//! the Keycloak admin API through the `keycloak-domain` adapters.

pub mod dto;
pub mod error;
pub mod macros;
pub mod mapper;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;
pub mod telemetry;

pub use error::{Code, RpcResult, RpcStatus};
pub use router::router;
pub use state::AppState;
