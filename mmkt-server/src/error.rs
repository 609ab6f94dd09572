//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mmkt_loader::LoadError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_code: String,
    pub message: String,
}

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("unknown bag '{0}'")]
    UnknownBag(String),

    /// The blocking load task panicked or was cancelled.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Load(LoadError::InvalidPageRequest(_) | LoadError::InvalidCriteria(_))
            | Self::UnknownBag(_) => StatusCode::BAD_REQUEST,
            Self::Load(LoadError::StorageUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Load(
                LoadError::ReconciliationMismatch { .. }
                | LoadError::InvalidData(_)
                | LoadError::Storage(_),
            )
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Load(LoadError::InvalidPageRequest(_)) => "INVALID_PAGE_REQUEST",
            Self::Load(LoadError::InvalidCriteria(_)) => "INVALID_CRITERIA",
            Self::Load(LoadError::StorageUnavailable(_)) => "STORAGE_UNAVAILABLE",
            Self::Load(LoadError::ReconciliationMismatch { .. }) => "RECONCILIATION_MISMATCH",
            Self::Load(LoadError::InvalidData(_)) => "INVALID_DATA",
            Self::Load(LoadError::Storage(_)) => "STORAGE_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::UnknownBag(_) => "INVALID_BAG",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.error_code(), "Request failed: {self}");
        } else {
            debug!(code = self.error_code(), "Request rejected: {self}");
        }
        let body = ErrorBody {
            error_code: self.error_code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
