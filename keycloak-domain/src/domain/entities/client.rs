use super::common::*;
use serde::{Deserialize, Serialize};

/// Keycloak `ClientRepresentation`.
///
/// `id` is the opaque identifier Keycloak generates; `client_id` is the
/// human-chosen name applications authenticate with. Admin endpoints are
/// addressed by `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientRepresentation {
    pub id: String,
    pub client_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub root_url: Option<String>,
    pub base_url: Option<String>,
    pub admin_url: Option<String>,
    pub protocol: Option<String>,
    pub client_authenticator_type: Option<String>,
    pub enabled: bool,
    pub surrogate_auth_required: bool,
    pub always_display_in_console: bool,
    pub bearer_only: bool,
    pub consent_required: bool,
    pub standard_flow_enabled: bool,
    pub implicit_flow_enabled: bool,
    pub direct_access_grants_enabled: bool,
    pub service_accounts_enabled: bool,
    pub public_client: bool,
    pub frontchannel_logout: bool,
    pub full_scope_allowed: bool,
    pub not_before: Option<i64>,
    pub node_re_registration_timeout: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub redirect_uris: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub web_origins: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub default_client_scopes: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub optional_client_scopes: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub attributes: AttributeMap,
    pub access: Option<Access>,
}

impl ClientRepresentation {
    /// Human identifier comparison used for single lookups. Keycloak itself
    /// treats client ids case-sensitively; this gateway does not.
    pub fn client_id_matches(&self, client_id: &str) -> bool {
        self.client_id.to_lowercase() == client_id.to_lowercase()
    }
}
