mod common;

use common::*;
use httpmock::prelude::*;
use keycloak_domain::{DomainError, KeycloakUserRepository, UserRepository, UserRepresentation};
use serde_json::json;

fn repository(server: &MockServer) -> KeycloakUserRepository {
    KeycloakUserRepository::new(rest_client(server))
}

fn users_listing() -> serde_json::Value {
    json!([
        {"id": "a", "username": "alice", "enabled": true},
        {"id": "b", "username": "bob", "enabled": false},
        {"id": "c", "username": "carol", "enabled": true}
    ])
}

#[tokio::test]
async fn create_posts_representation_and_expects_created() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(admin_path("/users"))
                .header("authorization", BEARER)
                .json_body(json!({
                    "username": "jdoe",
                    "enabled": true,
                    "emailVerified": false,
                    "email": "jdoe@example.com"
                }));
            then.status(201)
                .header("Location", format!("{}/users/new-id", admin_path("")));
        })
        .await;

    let user = UserRepresentation {
        username: "jdoe".to_string(),
        enabled: true,
        email: Some("jdoe@example.com".to_string()),
        ..Default::default()
    };
    repository(&server).create(&user, TOKEN).await.unwrap();

    create.assert_async().await;
}

#[tokio::test]
async fn conflicting_create_carries_status_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(admin_path("/users"));
            then.status(409)
                .json_body(json!({"errorMessage": "User exists with same username"}));
        })
        .await;

    let user = UserRepresentation {
        username: "jdoe".to_string(),
        ..Default::default()
    };
    let err = repository(&server).create(&user, TOKEN).await.unwrap_err();

    match err {
        DomainError::UnexpectedStatus {
            status,
            status_text,
            body,
            ..
        } => {
            assert_eq!(status, 409);
            assert_eq!(status_text, "409 Conflict");
            assert!(body.contains("User exists with same username"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn update_puts_to_user_resource() {
    let server = MockServer::start_async().await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(admin_path("/users/u-1"))
                .header("authorization", BEARER)
                .json_body_partial(r#"{"id": "u-1", "firstName": "Jane"}"#);
            then.status(204);
        })
        .await;

    let user = UserRepresentation {
        id: Some("u-1".to_string()),
        username: "jdoe".to_string(),
        first_name: Some("Jane".to_string()),
        ..Default::default()
    };
    repository(&server).update(&user, TOKEN).await.unwrap();

    update.assert_async().await;
}

#[tokio::test]
async fn get_by_id_decodes_user() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(admin_path("/users/u-1"));
            then.status(200).json_body(json!({
                "id": "u-1",
                "username": "jdoe",
                "enabled": true,
                "emailVerified": true,
                "attributes": {"phoneNumber": ["+4712345678"]},
                "realmRoles": null
            }));
        })
        .await;

    let user = repository(&server).get_by_id("u-1", TOKEN).await.unwrap();

    assert_eq!(user.id.as_deref(), Some("u-1"));
    assert!(user.email_verified);
    assert!(user.realm_roles.is_empty());
    assert_eq!(user.attributes["phoneNumber"], json!(["+4712345678"]));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(admin_path("/users/u-1"));
            then.status(200).body("not json");
        })
        .await;

    let err = repository(&server).get_by_id("u-1", TOKEN).await.unwrap_err();
    assert!(matches!(err, DomainError::Decode { .. }));
}

#[tokio::test]
async fn get_by_username_takes_first_match() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(admin_path("/users"))
                .query_param("username", "jdoe");
            then.status(200).json_body(json!([
                {"id": "u-1", "username": "jdoe"},
                {"id": "u-2", "username": "jdoe2"}
            ]));
        })
        .await;

    let user = repository(&server)
        .get_by_username("jdoe", TOKEN)
        .await
        .unwrap();

    search.assert_async().await;
    assert_eq!(user.id.as_deref(), Some("u-1"));
}

#[tokio::test]
async fn get_by_username_without_match_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(admin_path("/users"));
            then.status(200).json_body(json!([]));
        })
        .await;

    let err = repository(&server)
        .get_by_username("ghost", TOKEN)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(err.to_string(), "could not find user: ghost");
}

#[tokio::test]
async fn get_by_ids_keeps_request_order_and_skips_missing() {
    let server = MockServer::start_async().await;
    let listing = server
        .mock_async(|when, then| {
            when.method(GET).path(admin_path("/users"));
            then.status(200).json_body(users_listing());
        })
        .await;

    let users = repository(&server)
        .get_by_ids(&keys(&["c", "missing", "a"]), TOKEN)
        .await
        .unwrap();

    listing.assert_hits_async(1).await;
    let ids: Vec<_> = users.iter().map(|u| u.id_or_empty()).collect();
    assert_eq!(ids, vec!["c", "a"]);
}

#[tokio::test]
async fn get_by_usernames_fills_missing_with_default() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(admin_path("/users"));
            then.status(200).json_body(users_listing());
        })
        .await;

    let users = repository(&server)
        .get_by_usernames(&keys(&["alice", "missing"]), TOKEN)
        .await
        .unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "alice");
    assert_eq!(users[1], UserRepresentation::default());
}

#[tokio::test]
async fn delete_expects_no_content() {
    let server = MockServer::start_async().await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path(admin_path("/users/u-1"));
            then.status(204);
        })
        .await;

    repository(&server).delete("u-1", TOKEN).await.unwrap();
    delete.assert_async().await;
}

#[tokio::test]
async fn group_membership_is_put_and_deleted() {
    let server = MockServer::start_async().await;
    let join = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(admin_path("/users/u-1/groups/g-1"))
                .header("authorization", BEARER);
            then.status(204);
        })
        .await;
    let leave = server
        .mock_async(|when, then| {
            when.method(DELETE).path(admin_path("/users/u-1/groups/g-1"));
            then.status(204);
        })
        .await;

    let repo = repository(&server);
    repo.add_to_group("u-1", "g-1", TOKEN).await.unwrap();
    repo.remove_from_group("u-1", "g-1", TOKEN).await.unwrap();

    join.assert_async().await;
    leave.assert_async().await;
}

#[tokio::test]
async fn set_password_reports_true_on_no_content() {
    let server = MockServer::start_async().await;
    let reset = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(admin_path("/users/u-1/reset-password"))
                .json_body(json!({"type": "password", "value": "n3w", "temporary": true}));
            then.status(204);
        })
        .await;

    let changed = repository(&server)
        .set_password("u-1", "n3w", true, TOKEN)
        .await
        .unwrap();

    reset.assert_async().await;
    assert!(changed);
}

#[tokio::test]
async fn set_password_fails_on_other_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path(admin_path("/users/u-1/reset-password"));
            then.status(400)
                .json_body(json!({"error": "invalidPasswordMinLengthMessage"}));
        })
        .await;

    let err = repository(&server)
        .set_password("u-1", "x", false, TOKEN)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn authenticate_public_client_omits_secret() {
    let server = MockServer::start_async().await;
    let grant = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(token_path())
                .x_www_form_urlencoded_tuple("grant_type", "password")
                .x_www_form_urlencoded_tuple("client_id", "web")
                .x_www_form_urlencoded_tuple("username", "jdoe")
                .x_www_form_urlencoded_tuple("password", "p@ss word")
                .x_www_form_urlencoded_tuple("scope", "openid profile")
                .matches(|req| {
                    let body = req.body.as_deref().unwrap_or_default();
                    !String::from_utf8_lossy(body).contains("client_secret")
                });
            then.status(200)
                .json_body(json!({"access_token": "user-token", "id_token": "id", "expires_in": 60}));
        })
        .await;

    let token = repository(&server)
        .authenticate("jdoe", "p@ss word", "web", None)
        .await
        .unwrap();

    grant.assert_async().await;
    assert_eq!(token.access_token, "user-token");
    assert_eq!(token.id_token, "id");
}

#[tokio::test]
async fn authenticate_confidential_client_sends_secret() {
    let server = MockServer::start_async().await;
    let grant = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(token_path())
                .x_www_form_urlencoded_tuple("client_secret", "web-secret");
            then.status(200).json_body(json!({"access_token": "user-token"}));
        })
        .await;

    repository(&server)
        .authenticate("jdoe", "pw", "web", Some("web-secret"))
        .await
        .unwrap();

    grant.assert_async().await;
}

#[tokio::test]
async fn rejected_credentials_fail_authentication() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(token_path());
            then.status(401).json_body(json!({
                "error": "invalid_grant",
                "error_description": "Invalid user credentials"
            }));
        })
        .await;

    let err = repository(&server)
        .authenticate("jdoe", "wrong", "web", None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("Invalid user credentials"));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let repo = KeycloakUserRepository::new(unreachable_rest_client());
    let err = repo.get_all(TOKEN).await.unwrap_err();

    assert!(matches!(err, DomainError::Transport { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn traversing_id_stays_inside_users() {
    let server = MockServer::start_async().await;
    let user_delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path_contains(admin_path("/users/"));
            then.status(204);
        })
        .await;
    let group_delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path(admin_path("/groups/g-1"));
            then.status(204);
        })
        .await;

    repository(&server)
        .delete("../groups/g-1", TOKEN)
        .await
        .unwrap();

    user_delete.assert_hits_async(1).await;
    group_delete.assert_hits_async(0).await;
}

#[tokio::test]
async fn query_in_id_does_not_reach_the_listing() {
    let server = MockServer::start_async().await;
    let listing = server
        .mock_async(|when, then| {
            when.method(GET).path(admin_path("/users"));
            then.status(200).json_body(users_listing());
        })
        .await;
    let single = server
        .mock_async(|when, then| {
            when.method(GET).path_contains(admin_path("/users/"));
            then.status(404).json_body(json!({"error": "User not found"}));
        })
        .await;

    let err = repository(&server).get_by_id("?x=1", TOKEN).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    single.assert_hits_async(1).await;
    listing.assert_hits_async(0).await;
}

#[tokio::test]
async fn dot_ids_are_refused_before_sending() {
    let server = MockServer::start_async().await;
    let any_admin = server
        .mock_async(|when, then| {
            when.path_contains(admin_path("/"));
            then.status(200).json_body(users_listing());
        })
        .await;

    let repo = repository(&server);
    for id in ["..", ".", ""] {
        let err = repo.get_by_id(id, TOKEN).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }), "{id:?}: {err:?}");
    }
    let err = repo.delete("..", TOKEN).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    any_admin.assert_hits_async(0).await;
}
