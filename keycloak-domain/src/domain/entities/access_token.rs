use serde::{Deserialize, Serialize};

/// Body of an OpenID Connect token endpoint response.
///
/// Every field defaults when missing, so an error body such as
/// `{"error": "invalid_client"}` decodes into a token with an empty
/// `access_token` and a populated `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: i64,
    pub refresh_expires_in: i64,
    pub refresh_token: String,
    pub token_type: String,
    pub id_token: String,
    #[serde(rename = "not-before-policy")]
    pub not_before_policy: i64,
    pub session_state: String,
    pub scope: String,
    pub error: String,
    pub error_description: String,
    pub error_uri: String,
}

impl AccessToken {
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}
