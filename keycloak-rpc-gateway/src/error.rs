use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use keycloak_domain::{AuthError, DomainError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// RPC status codes surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    InvalidArgument,
    Unauthenticated,
    NotFound,
    Internal,
}

impl Code {
    pub fn http_status(self) -> StatusCode {
        match self {
            Code::InvalidArgument => StatusCode::BAD_REQUEST,
            Code::Unauthenticated => StatusCode::UNAUTHORIZED,
            Code::NotFound => StatusCode::NOT_FOUND,
            Code::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::Unauthenticated => "UNAUTHENTICATED",
            Code::NotFound => "NOT_FOUND",
            Code::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed RPC: the classified code plus the underlying error text
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct RpcStatus {
    pub code: Code,
    pub message: String,
}

impl RpcStatus {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    pub fn not_found(err: impl std::fmt::Display) -> Self {
        Self::new(Code::NotFound, err.to_string())
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::new(Code::Internal, err.to_string())
    }
}

/// Token acquisition failures are always unauthenticated
impl From<AuthError> for RpcStatus {
    fn from(err: AuthError) -> Self {
        Self::new(Code::Unauthenticated, err.to_string())
    }
}

impl IntoResponse for RpcStatus {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "code": self.code,
            "message": self.message,
        }));

        let mut response = (self.code.http_status(), body).into_response();
        // read back by the request logger
        response.extensions_mut().insert(self);
        response
    }
}

pub type RpcResult<T> = Result<T, RpcStatus>;

/// Call-site classification of backend failures
pub trait Classify<T> {
    /// Lookups whose failure means the entity is absent
    fn or_not_found(self) -> RpcResult<T>;

    fn or_internal(self) -> RpcResult<T>;
}

impl<T> Classify<T> for Result<T, DomainError> {
    fn or_not_found(self) -> RpcResult<T> {
        self.map_err(|err| match err {
            DomainError::Validation { .. } => RpcStatus::invalid_argument(err.to_string()),
            err => RpcStatus::not_found(err),
        })
    }

    fn or_internal(self) -> RpcResult<T> {
        self.map_err(|err| match err {
            DomainError::Validation { .. } => RpcStatus::invalid_argument(err.to_string()),
            err => RpcStatus::internal(err),
        })
    }
}
