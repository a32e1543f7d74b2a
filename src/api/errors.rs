use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core::metrics::record_domain_error;
use crate::services::assignments::AssignmentError;

pub(crate) const INVALID_UUID_DETAIL: &str = "UUID of course validation error. UUID should be \
     32..36 length and UUID must contains only hex symbols.";
pub(crate) const ELEMENT_PLACEMENT_DETAIL: &str = "You cannot add this elements. Some of them go \
     beyond the limits of the playing field or are placed on already occupied squares. Or \
     assignment doesn't exist.";
pub(crate) const DATABASE_ERROR_DETAIL: &str = "Database error";
pub(crate) const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

#[derive(Debug)]
pub(crate) enum ApiError {
    Unauthorized(&'static str),
    Forbidden(&'static str),
    BadRequest(String),
    NotFound(String),
    /// Request could not be extracted; keeps the extractor's status.
    Rejected(StatusCode, String),
    Internal(String),
}

impl ApiError {
    /// Log the underlying error with context and return an opaque `Internal` variant.
    pub(crate) fn internal(err: impl std::fmt::Display, context: &str) -> Self {
        tracing::error!(error = %err, "{context}");
        Self::Internal(INTERNAL_ERROR_DETAIL.to_string())
    }

    pub(crate) fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Rejected(status, _) => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AssignmentError> for ApiError {
    fn from(error: AssignmentError) -> Self {
        match error {
            AssignmentError::Storage(err) => {
                record_domain_error("storage");
                tracing::error!(error = %err, "Database error");
                ApiError::Internal(DATABASE_ERROR_DETAIL.to_string())
            }
            AssignmentError::InvalidUuid(value) => {
                record_domain_error("invalid_uuid");
                tracing::info!(uuid = %value, "Rejected malformed uuid");
                ApiError::BadRequest(INVALID_UUID_DETAIL.to_string())
            }
            AssignmentError::CourseNotFound(course_id) => {
                record_domain_error("course_not_found");
                tracing::info!(course_id = %course_id, "Course does not exist");
                ApiError::BadRequest(format!(
                    "Course with id {course_id} not found, can't create assignment"
                ))
            }
            AssignmentError::GameField(message) => {
                record_domain_error("game_field");
                tracing::info!(reason = %message, "Rejected game field");
                ApiError::BadRequest(message)
            }
            AssignmentError::Position(message) => {
                record_domain_error("position");
                tracing::info!(reason = %message, "Rejected start position");
                ApiError::BadRequest(message)
            }
            AssignmentError::NotFound(assignment_id) => {
                record_domain_error("assignment_not_found");
                tracing::info!(assignment_id = %assignment_id, "Assignment not found");
                ApiError::NotFound(format!("Assignment with id {assignment_id} not found"))
            }
            AssignmentError::ElementPlacement(reason) => {
                record_domain_error("element_placement");
                tracing::info!(reason = %reason, "Rejected element batch");
                ApiError::BadRequest(ELEMENT_PLACEMENT_DETAIL.to_string())
            }
            AssignmentError::Internal(message) => {
                record_domain_error("internal");
                ApiError::internal(message, "Assignment operation failed")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Unauthorized(message) => {
                let mut response =
                    (status, Json(ErrorResponse { detail: message.to_string() })).into_response();
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                response
            }
            ApiError::Forbidden(message) => {
                (status, Json(ErrorResponse { detail: message.to_string() })).into_response()
            }
            ApiError::BadRequest(detail)
            | ApiError::NotFound(detail)
            | ApiError::Rejected(_, detail) => {
                (status, Json(ErrorResponse { detail })).into_response()
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "Internal server error");
                (status, Json(ErrorResponse { detail })).into_response()
            }
        }
    }
}
