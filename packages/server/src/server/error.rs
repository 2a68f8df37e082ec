//! Mapping from domain errors to HTTP responses.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::common::{StoreError, ValidationError};
use crate::domains::listings::{CreateListingError, CreationPhase, QueryError};
use crate::domains::messages::SendMessageError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    phase: Option<CreationPhase>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phase: Option<CreationPhase>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            phase: None,
        }
    }

    pub fn not_found(what: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{} not found", what))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "Request failed");
        }
        let body = ErrorBody {
            error: self.message,
            phase: self.phase,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::new(err.status(), err.body_text())
    }
}

impl From<CreateListingError> for ApiError {
    fn from(err: CreateListingError) -> Self {
        let status = match &err {
            CreateListingError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CreateListingError::Upload(_) => StatusCode::BAD_GATEWAY,
            CreateListingError::Insert { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
            phase: Some(err.phase()),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Validation(e) => e.into(),
            QueryError::Store(e) => e.into(),
        }
    }
}

impl From<SendMessageError> for ApiError {
    fn from(err: SendMessageError) -> Self {
        match err {
            SendMessageError::Validation(e) => e.into(),
            SendMessageError::ListingNotFound(id) => {
                Self::new(StatusCode::NOT_FOUND, format!("Listing {} not found", id))
            }
            SendMessageError::Store(e) => e.into(),
        }
    }
}
