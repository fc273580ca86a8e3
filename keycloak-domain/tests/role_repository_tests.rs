mod common;

use common::*;
use httpmock::prelude::*;
use keycloak_domain::{
    ClientRepository, DomainError, KeycloakClientRepository, KeycloakRoleRepository,
    RoleRepository, RoleRepresentation,
};
use serde_json::json;
use std::sync::Arc;

fn repository(server: &MockServer) -> KeycloakRoleRepository {
    let rest = rest_client(server);
    let clients: Arc<dyn ClientRepository> = Arc::new(KeycloakClientRepository::new(rest.clone()));
    KeycloakRoleRepository::new(rest, clients)
}

#[tokio::test]
async fn create_role_resolves_own_client_then_posts() {
    let server = MockServer::start_async().await;
    let listing = server
        .mock_async(|when, then| {
            when.method(GET).path(admin_path("/clients"));
            then.status(200).json_body(json!([
                {"id": "91ab", "clientId": "account"},
                {"id": "7d2e", "clientId": CLIENT_ID}
            ]));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(admin_path("/clients/7d2e/roles"))
                .header("authorization", BEARER)
                .json_body(json!({
                    "name": "reporter",
                    "description": "Read-only reports",
                    "composite": false,
                    "clientRole": false
                }));
            then.status(201);
        })
        .await;

    let role = RoleRepresentation {
        description: Some("Read-only reports".to_string()),
        ..RoleRepresentation::named("reporter")
    };
    repository(&server).create_role(&role, TOKEN).await.unwrap();

    listing.assert_hits_async(1).await;
    create.assert_hits_async(1).await;
}

#[tokio::test]
async fn create_role_stops_when_client_lookup_fails() {
    let server = MockServer::start_async().await;
    let listing = server
        .mock_async(|when, then| {
            when.method(GET).path(admin_path("/clients"));
            then.status(500);
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path_contains("/roles");
            then.status(201);
        })
        .await;

    let result = repository(&server)
        .create_role(&RoleRepresentation::named("reporter"), TOKEN)
        .await;

    assert!(result.is_err());
    listing.assert_hits_async(1).await;
    create.assert_hits_async(0).await;
}

#[tokio::test]
async fn create_role_requires_own_client_to_exist() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(admin_path("/clients"));
            then.status(200).json_body(json!([{"id": "91ab", "clientId": "account"}]));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path_contains("/roles");
            then.status(201);
        })
        .await;

    let err = repository(&server)
        .create_role(&RoleRepresentation::named("reporter"), TOKEN)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), format!("could not find client: {CLIENT_ID}"));
    create.assert_hits_async(0).await;
}

#[tokio::test]
async fn realm_mappings_are_posted_and_deleted_as_lists() {
    let server = MockServer::start_async().await;
    let expected_body = json!([{"id": "r-1", "name": "auditor", "composite": false, "clientRole": false}]);
    let assign = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(admin_path("/users/u-1/role-mappings/realm"))
                .json_body(expected_body.clone());
            then.status(204);
        })
        .await;
    let remove = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path(admin_path("/users/u-1/role-mappings/realm"))
                .json_body(expected_body.clone());
            then.status(204);
        })
        .await;

    let repo = repository(&server);
    let role = RoleRepresentation::reference("r-1", "auditor");
    repo.assign_to_user("u-1", &role, TOKEN).await.unwrap();
    repo.remove_from_user("u-1", &role, TOKEN).await.unwrap();

    assign.assert_async().await;
    remove.assert_async().await;
}

#[tokio::test]
async fn assigned_and_available_roles_are_listed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(admin_path("/users/u-1/role-mappings/realm"));
            then.status(200).json_body(json!([
                {"id": "r-1", "name": "offline_access", "composite": false,
                 "clientRole": false, "containerId": "demo"}
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(admin_path("/users/u-1/role-mappings/realm/available"));
            then.status(200).json_body(json!([
                {"id": "r-2", "name": "auditor", "description": "Audit access"},
                {"id": "r-3", "name": "admin", "composite": true}
            ]));
        })
        .await;

    let repo = repository(&server);
    let assigned = repo.list_assigned("u-1", TOKEN).await.unwrap();
    let available = repo.list_available("u-1", TOKEN).await.unwrap();

    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].container_id.as_deref(), Some("demo"));
    assert_eq!(available.len(), 2);
    assert!(available[1].composite);
}

#[tokio::test]
async fn failed_assignment_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(admin_path("/users/u-1/role-mappings/realm"));
            then.status(404).json_body(json!({"error": "Role not found"}));
        })
        .await;

    let err = repository(&server)
        .assign_to_user("u-1", &RoleRepresentation::reference("r-9", "ghost"), TOKEN)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn traversing_user_id_never_maps_a_group() {
    let server = MockServer::start_async().await;
    let user_mapping = server
        .mock_async(|when, then| {
            when.method(POST)
                .path_contains(admin_path("/users/"))
                .path_contains("/role-mappings/realm");
            then.status(204);
        })
        .await;
    let group_mapping = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(admin_path("/groups/g-1/role-mappings/realm"));
            then.status(204);
        })
        .await;

    repository(&server)
        .assign_to_user(
            "../groups/g-1",
            &RoleRepresentation::reference("r-1", "auditor"),
            TOKEN,
        )
        .await
        .unwrap();

    user_mapping.assert_hits_async(1).await;
    group_mapping.assert_hits_async(0).await;
}

#[tokio::test]
async fn query_in_user_id_is_not_a_query() {
    let server = MockServer::start_async().await;
    let assigned = server
        .mock_async(|when, then| {
            when.method(GET)
                .path_contains("/role-mappings/realm")
                .query_param_exists("x");
            then.status(200).json_body(json!([]));
        })
        .await;

    let err = repository(&server)
        .list_assigned("?x=1", TOKEN)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assigned.assert_hits_async(0).await;
}

#[tokio::test]
async fn dot_user_id_is_refused_before_sending() {
    let server = MockServer::start_async().await;
    let any_admin = server
        .mock_async(|when, then| {
            when.path_contains(admin_path("/"));
            then.status(200).json_body(json!([]));
        })
        .await;

    let err = repository(&server)
        .list_available("..", TOKEN)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation { .. }));
    any_admin.assert_hits_async(0).await;
}
