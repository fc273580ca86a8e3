use axum::{
    extract::{rejection::JsonRejection, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::dto::*;
use crate::error::RpcStatus;
use crate::middleware::log_rpc;
use crate::state::AppState;

/// A `POST` handler decoding `$request` and dispatching to one service
/// method. Undecodable bodies are `INVALID_ARGUMENT`.
macro_rules! rpc {
    ($service:ident . $method:ident ( $request:ty )) => {
        post(
            |State(state): State<AppState>, payload: Result<Json<$request>, JsonRejection>| async move {
                let Json(request) =
                    payload.map_err(|rejection| RpcStatus::invalid_argument(rejection.body_text()))?;
                state.$service.$method(request).await.map(Json)
            },
        )
    };
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // User service
        .route("/keycloak.UserService/CreateUser", rpc!(users.create_user(UserRequest)))
        .route("/keycloak.UserService/UpdateUser", rpc!(users.update_user(UpdateUserRequest)))
        .route("/keycloak.UserService/GetUserById", rpc!(users.get_user_by_id(StringValue)))
        .route(
            "/keycloak.UserService/GetUserByUsername",
            rpc!(users.get_user_by_username(StringValue)),
        )
        .route("/keycloak.UserService/DeleteUser", rpc!(users.delete_user(StringValue)))
        .route(
            "/keycloak.UserService/AddUserToGroup",
            rpc!(users.add_user_to_group(UserGroupRequest)),
        )
        .route(
            "/keycloak.UserService/RemoveUserFromGroup",
            rpc!(users.remove_user_from_group(UserGroupRequest)),
        )
        .route(
            "/keycloak.UserService/Authenticate",
            rpc!(users.authenticate(AuthenticateRequest)),
        )
        .route("/keycloak.UserService/GetAllUsers", rpc!(users.get_all_users(Empty)))
        .route(
            "/keycloak.UserService/GetUsersByIds",
            rpc!(users.get_users_by_ids(StringsRequest)),
        )
        .route(
            "/keycloak.UserService/GetUsersByUsernames",
            rpc!(users.get_users_by_usernames(StringsRequest)),
        )
        .route(
            "/keycloak.UserService/SetUserPassword",
            rpc!(users.set_user_password(PasswordRequest)),
        )
        // Group service
        .route("/keycloak.GroupService/CreateGroup", rpc!(groups.create_group(GroupRequest)))
        .route(
            "/keycloak.GroupService/GetGroupsInRealm",
            rpc!(groups.get_groups_in_realm(Empty)),
        )
        .route("/keycloak.GroupService/GetGroupById", rpc!(groups.get_group_by_id(StringValue)))
        .route("/keycloak.GroupService/DeleteGroup", rpc!(groups.delete_group(StringValue)))
        .route(
            "/keycloak.GroupService/GetGroupMembers",
            rpc!(groups.get_group_members(StringValue)),
        )
        .route(
            "/keycloak.GroupService/AddRoleToGroup",
            rpc!(groups.add_role_to_group(RoleGroupRequest)),
        )
        // Role service
        .route(
            "/keycloak.RoleService/AssignRoleToUser",
            rpc!(roles.assign_role_to_user(UserRoleRequest)),
        )
        .route(
            "/keycloak.RoleService/RemoveRoleFromUser",
            rpc!(roles.remove_role_from_user(UserRoleRequest)),
        )
        .route("/keycloak.RoleService/GetUserRoles", rpc!(roles.get_user_roles(StringValue)))
        .route(
            "/keycloak.RoleService/GetAvailableRoles",
            rpc!(roles.get_available_roles(StringValue)),
        )
        .route("/keycloak.RoleService/CreateRole", rpc!(roles.create_role(RoleRequest)))
        // Client service
        .route("/keycloak.ClientService/GetClients", rpc!(clients.get_clients(Empty)))
        .route(
            "/keycloak.ClientService/GetClientById",
            rpc!(clients.get_client_by_id(StringValue)),
        )
        .route(
            "/keycloak.ClientService/GetClientByClientId",
            rpc!(clients.get_client_by_client_id(StringValue)),
        )
        .route(
            "/keycloak.ClientService/GetClientsByIds",
            rpc!(clients.get_clients_by_ids(StringsRequest)),
        )
        .route(
            "/keycloak.ClientService/GetClientsByClientIds",
            rpc!(clients.get_clients_by_client_ids(StringsRequest)),
        )
        .layer(middleware::from_fn(log_rpc))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
