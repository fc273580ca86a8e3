use thiserror::Error;

/// Failures surfaced by the Keycloak adapters
#[derive(Error, Debug)]
pub enum DomainError {
    /// No response was obtained (connection refused, reset, timeout, ...)
    #[error("could not {operation}: {message}")]
    Transport { operation: String, message: String },

    /// A response arrived but its status differs from the one the endpoint
    /// documents for success
    #[error("could not {operation}, got status: {status_text}{}", body_suffix(.body))]
    UnexpectedStatus {
        operation: String,
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("could not decode {operation} response: {message}")]
    Decode { operation: String, message: String },

    /// A caller-supplied value that cannot be sent to the backend
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("could not find {entity_type}: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn body_suffix(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(" ({body})")
    }
}

impl DomainError {
    pub fn not_found(entity_type: &str, identifier: &str) -> Self {
        DomainError::NotFound {
            entity_type: entity_type.to_string(),
            identifier: identifier.to_string(),
        }
    }

    /// HTTP status carried by the error, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            DomainError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Service token acquisition errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token acquisition failed: {reason}")]
    TokenAcquisitionFailed { reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingRequired { key } => DomainError::Configuration {
                message: format!("Missing required configuration: {key}"),
            },
            ConfigError::InvalidValue { key, message } => DomainError::Configuration {
                message: format!("Invalid value for {key}: {message}"),
            },
        }
    }
}
