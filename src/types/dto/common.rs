use poem_openapi::Object;

/// Standardized error response model
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error type or category
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Acknowledgement returned by delete endpoints
#[derive(Object, Debug)]
pub struct MessageResponse {
    /// Human-readable result message
    pub detail: String,
}

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

pub(crate) fn default_true() -> bool {
    true
}
