use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Open, backend-defined attribute bag.
///
/// Keycloak usually sends `{"key": ["value", ...]}` but nothing stops a realm
/// from holding numbers, single strings or nested objects, so values stay
/// untyped until they are rendered for the RPC layer.
pub type AttributeMap = HashMap<String, serde_json::Value>;

/// Attribute key promoted to a dedicated field on the RPC user messages.
pub const PHONE_NUMBER_ATTRIBUTE: &str = "phoneNumber";

/// Access flags Keycloak attaches to users, groups and clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Access {
    pub manage_group_membership: bool,
    pub view: bool,
    pub map_roles: bool,
    pub impersonate: bool,
    pub manage: bool,
}

/// Treat an explicit JSON `null` the same as an absent field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Last path segment of a `Location` header, which Keycloak sets to the new
/// resource URL on 201 responses.
pub fn id_from_location(location: &str) -> Option<String> {
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.contains(':'))
        .map(str::to_string)
}
