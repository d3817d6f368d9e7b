use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::InternalError;
use crate::types::dto::common::ErrorResponse;

/// API error taxonomy shared by every endpoint
///
/// Each variant maps to a distinct HTTP status and carries a standardized
/// `{error, message, status_code}` body.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Entity referenced by id does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Uniqueness violation on name/username/email
    #[oai(status = 400)]
    Conflict(Json<ErrorResponse>),

    /// Role or city-scope check failed
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Missing, invalid, or expired credentials
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorResponse>),

    /// Value outside the allowed set
    #[oai(status = 400)]
    InvalidInput(Json<ErrorResponse>),

    /// Operation rejected by a business rule
    #[oai(status = 400)]
    InvalidOperation(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    Internal(Json<ErrorResponse>),
}

impl ApiError {
    /// Create a NotFound error
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    /// Create a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(Json(ErrorResponse {
            error: "conflict".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: message.into(),
            status_code: 403,
        }))
    }

    /// Create an Unauthenticated error
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated(Json(ErrorResponse {
            error: "unauthenticated".to_string(),
            message: message.into(),
            status_code: 401,
        }))
    }

    /// Create an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(Json(ErrorResponse {
            error: "invalid_input".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    /// Create an InvalidOperation error
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        ApiError::InvalidOperation(Json(ErrorResponse {
            error: "invalid_operation".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: message.into(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ApiError::NotFound(json) => json.0.message.clone(),
            ApiError::Conflict(json) => json.0.message.clone(),
            ApiError::Forbidden(json) => json.0.message.clone(),
            ApiError::Unauthenticated(json) => json.0.message.clone(),
            ApiError::InvalidInput(json) => json.0.message.clone(),
            ApiError::InvalidOperation(json) => json.0.message.clone(),
            ApiError::Internal(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        tracing::error!(error = %err, "internal error surfaced to API");
        ApiError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_matching_status_codes() {
        let cases = [
            (ApiError::not_found("x"), 404),
            (ApiError::conflict("x"), 400),
            (ApiError::forbidden("x"), 403),
            (ApiError::unauthenticated("x"), 401),
            (ApiError::invalid_input("x"), 400),
            (ApiError::invalid_operation("x"), 400),
            (ApiError::internal("x"), 500),
        ];

        for (error, expected) in cases {
            let status_code = match &error {
                ApiError::NotFound(json) => json.0.status_code,
                ApiError::Conflict(json) => json.0.status_code,
                ApiError::Forbidden(json) => json.0.status_code,
                ApiError::Unauthenticated(json) => json.0.status_code,
                ApiError::InvalidInput(json) => json.0.status_code,
                ApiError::InvalidOperation(json) => json.0.status_code,
                ApiError::Internal(json) => json.0.status_code,
            };
            assert_eq!(status_code, expected);
        }
    }

    #[test]
    fn test_message_is_preserved() {
        let error = ApiError::forbidden("Not enough permissions");
        assert_eq!(error.message(), "Not enough permissions");
        assert_eq!(error.to_string(), "Not enough permissions");
    }
}
