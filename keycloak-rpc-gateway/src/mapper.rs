//! Conversions between RPC messages and Keycloak representations.
//!
//! Keycloak attribute values are untyped JSON; RPC attributes are strings.
//! Rendering is lossy: list values are joined and bracket characters are
//! dropped, so a rendered map cannot be written back unchanged.

use keycloak_domain::{
    AccessToken, AttributeMap, ClientRepresentation, Credential, GroupRepresentation,
    RoleRepresentation, UserPatch, UserRepresentation, PHONE_NUMBER_ATTRIBUTE,
};
use serde_json::Value;
use std::collections::HashMap;

use crate::dto::*;

/// Display string for one attribute value.
pub fn attribute_to_string(value: &Value) -> String {
    render(value).replace(['[', ']'], "")
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

pub fn stringify_attributes(attributes: &AttributeMap) -> HashMap<String, String> {
    attributes
        .iter()
        .map(|(key, value)| (key.clone(), attribute_to_string(value)))
        .collect()
}

/// `Some` only for a present, non-empty wrapper
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<UserRequest> for UserRepresentation {
    fn from(request: UserRequest) -> Self {
        let mut attributes: AttributeMap = request
            .attributes
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();

        if let Some(phone_number) = present(request.phone_number) {
            attributes.insert(PHONE_NUMBER_ATTRIBUTE.to_string(), Value::String(phone_number));
        }

        let credentials = if request.password.is_empty() {
            Vec::new()
        } else {
            vec![Credential::password(request.password, false)]
        };

        UserRepresentation {
            username: request.username,
            enabled: request.enabled,
            email_verified: request.email_verified,
            email: present(request.email),
            first_name: present(request.first_name),
            last_name: present(request.last_name),
            attributes,
            credentials,
            ..Default::default()
        }
    }
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(request: UpdateUserRequest) -> Self {
        UserPatch {
            enabled: request.enabled,
            email_verified: request.email_verified,
            email: present(request.email),
            first_name: present(request.first_name),
            last_name: present(request.last_name),
            phone_number: present(request.phone_number),
            attributes: request.attributes,
        }
    }
}

impl From<UserRepresentation> for UserResponse {
    fn from(user: UserRepresentation) -> Self {
        let attributes = stringify_attributes(&user.attributes);
        let phone_number = attributes
            .get(PHONE_NUMBER_ATTRIBUTE)
            .cloned()
            .unwrap_or_default();

        UserResponse {
            sub: user.id.unwrap_or_default(),
            username: user.username,
            email: user.email.unwrap_or_default(),
            given_name: user.first_name.unwrap_or_default(),
            family_name: user.last_name.unwrap_or_default(),
            phone_number,
            attributes,
            roles: user.realm_roles,
        }
    }
}

impl From<AccessToken> for AccessTokenResponse {
    fn from(token: AccessToken) -> Self {
        AccessTokenResponse {
            access_token: token.access_token,
            expires_in: token.expires_in,
            refresh_expires_in: token.refresh_expires_in,
            refresh_token: token.refresh_token,
            token_type: token.token_type,
            id_token: token.id_token,
            not_before_policy: token.not_before_policy,
            session_state: token.session_state,
            scope: token.scope,
        }
    }
}

impl From<ClientRepresentation> for ClientResponse {
    fn from(client: ClientRepresentation) -> Self {
        ClientResponse {
            attributes: stringify_attributes(&client.attributes),
            id: client.id,
            client_id: client.client_id,
            name: client.name.unwrap_or_default(),
            root_url: client.root_url.unwrap_or_default(),
            web_url: client.base_url.unwrap_or_default(),
            enabled: client.enabled,
        }
    }
}

impl From<GroupRepresentation> for GroupResponse {
    fn from(group: GroupRepresentation) -> Self {
        GroupResponse {
            id: group.id.unwrap_or_default(),
            name: group.name,
            path: group.path,
        }
    }
}

impl From<RoleRepresentation> for RoleResponse {
    fn from(role: RoleRepresentation) -> Self {
        RoleResponse {
            id: role.id.unwrap_or_default(),
            name: role.name,
            description: role.description.unwrap_or_default(),
            composite: role.composite,
            client_role: role.client_role,
            container_id: role.container_id.unwrap_or_default(),
        }
    }
}

/// Role body for creation: name and, when given, description.
pub fn new_role(name: String, description: Option<String>) -> RoleRepresentation {
    RoleRepresentation {
        description: present(description),
        ..RoleRepresentation::named(name)
    }
}

/// Role reference for mapping endpoints. An absent or empty name is left
/// empty.
pub fn role_reference(id: String, name: Option<String>) -> RoleRepresentation {
    RoleRepresentation::reference(id, present(name).unwrap_or_default())
}

pub fn collect<S, T: From<S>>(items: Vec<S>) -> Vec<T> {
    items.into_iter().map(T::from).collect()
}
