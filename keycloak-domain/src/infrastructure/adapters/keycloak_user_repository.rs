use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use tracing::{info, instrument};

use super::keycloak_rest::{read_json, KeycloakRestClient};
use crate::application::ports::repository::UserRepository;
use crate::domain::{entities::*, errors::*, lookup};

pub struct KeycloakUserRepository {
    rest: KeycloakRestClient,
}

impl KeycloakUserRepository {
    pub fn new(rest: KeycloakRestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl UserRepository for KeycloakUserRepository {
    #[instrument(skip(self, user, token), fields(username = %user.username))]
    async fn create(&self, user: &UserRepresentation, token: &str) -> DomainResult<()> {
        let request = self.rest.admin(Method::POST, &["users"], token)?.json(user);
        self.rest
            .execute("create user", request, StatusCode::CREATED)
            .await?;

        info!("Created user {}", user.username);
        Ok(())
    }

    #[instrument(skip(self, user, token), fields(user_id = %user.id_or_empty()))]
    async fn update(&self, user: &UserRepresentation, token: &str) -> DomainResult<()> {
        let request = self
            .rest
            .admin(Method::PUT, &["users", user.id_or_empty()], token)?
            .json(user);
        self.rest
            .execute("update user", request, StatusCode::NO_CONTENT)
            .await?;

        info!("Updated user {}", user.id_or_empty());
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn get_by_id(&self, id: &str, token: &str) -> DomainResult<UserRepresentation> {
        let request = self.rest.admin(Method::GET, &["users", id], token)?;
        self.rest.fetch("get user", request).await
    }

    #[instrument(skip(self, token))]
    async fn get_by_username(
        &self,
        username: &str,
        token: &str,
    ) -> DomainResult<UserRepresentation> {
        let request = self
            .rest
            .admin(Method::GET, &["users"], token)?
            .query(&[("username", username)]);
        let users: Vec<UserRepresentation> = self.rest.fetch("get user by username", request).await?;

        users
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found("user", username))
    }

    #[instrument(skip(self, token))]
    async fn get_all(&self, token: &str) -> DomainResult<Vec<UserRepresentation>> {
        let request = self.rest.admin(Method::GET, &["users"], token)?;
        self.rest.fetch("get users", request).await
    }

    #[instrument(skip(self, token), fields(count = ids.len()))]
    async fn get_by_ids(
        &self,
        ids: &[String],
        token: &str,
    ) -> DomainResult<Vec<UserRepresentation>> {
        let users = self.get_all(token).await?;
        Ok(lookup::select_present(users, ids, |u| u.id_or_empty()))
    }

    #[instrument(skip(self, token), fields(count = usernames.len()))]
    async fn get_by_usernames(
        &self,
        usernames: &[String],
        token: &str,
    ) -> DomainResult<Vec<UserRepresentation>> {
        let users = self.get_all(token).await?;
        Ok(lookup::select_or_default(users, usernames, |u| {
            u.username.as_str()
        }))
    }

    #[instrument(skip(self, token))]
    async fn delete(&self, id: &str, token: &str) -> DomainResult<()> {
        let request = self.rest.admin(Method::DELETE, &["users", id], token)?;
        self.rest
            .execute("delete user", request, StatusCode::NO_CONTENT)
            .await?;

        info!("Deleted user {}", id);
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn add_to_group(&self, user_id: &str, group_id: &str, token: &str) -> DomainResult<()> {
        let request = self
            .rest
            .admin(Method::PUT, &["users", user_id, "groups", group_id], token)?;
        self.rest
            .execute("add user to group", request, StatusCode::NO_CONTENT)
            .await?;

        info!("Added user {} to group {}", user_id, group_id);
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn remove_from_group(
        &self,
        user_id: &str,
        group_id: &str,
        token: &str,
    ) -> DomainResult<()> {
        let request = self
            .rest
            .admin(Method::DELETE, &["users", user_id, "groups", group_id], token)?;
        self.rest
            .execute("remove user from group", request, StatusCode::NO_CONTENT)
            .await?;

        info!("Removed user {} from group {}", user_id, group_id);
        Ok(())
    }

    #[instrument(skip(self, password, client_secret))]
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
        client_id: &str,
        client_secret: Option<&str>,
    ) -> DomainResult<AccessToken> {
        let mut form = vec![
            ("grant_type", "password"),
            ("client_id", client_id),
            ("username", username),
            ("password", password),
            ("scope", "openid profile"),
        ];
        if let Some(secret) = client_secret.filter(|s| !s.is_empty()) {
            form.push(("client_secret", secret));
        }

        let request = self.rest.http().post(self.rest.token_url()).form(&form);
        let response = self
            .rest
            .execute("authenticate user", request, StatusCode::OK)
            .await?;

        info!("Authenticated user {}", username);
        read_json("authenticate user", response).await
    }

    #[instrument(skip(self, password, token))]
    async fn set_password(
        &self,
        id: &str,
        password: &str,
        temporary: bool,
        token: &str,
    ) -> DomainResult<bool> {
        let request = self
            .rest
            .admin(Method::PUT, &["users", id, "reset-password"], token)?
            .json(&Credential::password(password, temporary));
        self.rest
            .execute("set user password", request, StatusCode::NO_CONTENT)
            .await?;

        info!("Reset password for user {}", id);
        Ok(true)
    }
}
