use super::common::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keycloak `GroupRepresentation`, used both for the realm-wide listing
/// (overview entries) and for single-group reads.
///
/// Sub-groups are carried through untouched; nested hierarchies are not
/// resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRepresentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_groups: Vec<serde_json::Value>,
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
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub client_roles: HashMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
}

impl GroupRepresentation {
    /// A new top-level group, addressed by `/{name}`.
    pub fn top_level(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: format!("/{name}"),
            name,
            ..Default::default()
        }
    }
}
