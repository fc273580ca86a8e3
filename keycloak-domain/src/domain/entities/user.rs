use super::common::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keycloak `UserRepresentation` as exchanged with the admin REST API.
///
/// Optional fields are skipped when unset: Keycloak treats an absent field as
/// "leave unchanged" and an empty string as "clear", so the two must never be
/// conflated on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRepresentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totp: Option<bool>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub required_actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<i64>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub credentials: Vec<Credential>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub attributes: AttributeMap,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub realm_roles: Vec<String>,
}

impl UserRepresentation {
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Apply a selective update. Only values carried by the patch overwrite
    /// the current ones; attributes merge key by key.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(email_verified) = patch.email_verified {
            self.email_verified = email_verified;
        }
        if patch.email.is_some() {
            self.email = patch.email;
        }
        if patch.first_name.is_some() {
            self.first_name = patch.first_name;
        }
        if patch.last_name.is_some() {
            self.last_name = patch.last_name;
        }
        for (key, value) in patch.attributes {
            self.attributes.insert(key, serde_json::Value::String(value));
        }
        if let Some(phone_number) = patch.phone_number {
            self.attributes.insert(
                PHONE_NUMBER_ATTRIBUTE.to_string(),
                serde_json::Value::String(phone_number),
            );
        }
        // Password changes only ever go through the reset-password endpoint.
        self.credentials.clear();
    }
}

/// Changes to apply on top of a freshly fetched user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub enabled: Option<bool>,
    pub email_verified: Option<bool>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub attributes: HashMap<String, String>,
}

/// Credential payload. Write-only: Keycloak never returns the secret value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub temporary: bool,
}

impl Credential {
    pub fn password(value: impl Into<String>, temporary: bool) -> Self {
        Self {
            type_: "password".to_string(),
            value: value.into(),
            temporary,
        }
    }
}
