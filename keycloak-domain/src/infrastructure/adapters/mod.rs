pub mod env_config;
pub mod keycloak_client_repository;
pub mod keycloak_group_repository;
pub mod keycloak_rest;
pub mod keycloak_role_repository;
pub mod keycloak_token_provider;
pub mod keycloak_user_repository;

pub use env_config::*;
pub use keycloak_client_repository::*;
pub use keycloak_group_repository::*;
pub use keycloak_rest::*;
pub use keycloak_role_repository::*;
pub use keycloak_token_provider::*;
pub use keycloak_user_repository::*;
