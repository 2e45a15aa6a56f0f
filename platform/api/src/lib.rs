use std::sync::Arc;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod service;
pub mod shutdown;
pub mod wire;

pub use service::EmployeeService;
pub use shutdown::shutdown_signal;
pub use wire::*;

/// Shared RPC result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    InvalidInput(String),
    #[error("employee service unavailable: {0}")]
    Unavailable(String),
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Unavailable(_) => "UNAVAILABLE",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }

    /// Body sent over the wire. Internal details never leave the process.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            success: OperationStatus::Fail,
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }

    /// Rebuild an error received from a peer service.
    pub fn from_body(body: ErrorBody) -> Self {
        match body.code.as_str() {
            "NOT_FOUND" => ApiError::NotFound(strip_prefix(&body.message, "resource not found: ")),
            "INVALID_INPUT" => ApiError::InvalidInput(strip_prefix(&body.message, "bad request: ")),
            "UNAVAILABLE" => ApiError::Unavailable(strip_prefix(
                &body.message,
                "employee service unavailable: ",
            )),
            _ => ApiError::internal(anyhow::anyhow!("{}: {}", body.code, body.message)),
        }
    }
}

fn strip_prefix(message: &str, prefix: &str) -> String {
    message.strip_prefix(prefix).unwrap_or(message).to_string()
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

/// Lets handlers take `Result<Json<T>, JsonRejection>` and answer malformed
/// bodies with the regular error payload.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

/// JSON error payload. `success` mirrors the status field of the
/// delete/update responses so callers can check a single field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: OperationStatus,
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            tracing::error!(error = ?err, "request failed");
        }
        (self.status(), Json(self.body())).into_response()
    }
}
