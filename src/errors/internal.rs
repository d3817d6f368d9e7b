use sea_orm::DbErr;

/// Errors raised below the HTTP layer
///
/// Converted to `ApiError::Internal` at the API boundary; the operation name
/// identifies the failing store call in logs.
#[derive(Debug, thiserror::Error)]
pub enum InternalError {
    #[error("database operation '{operation}' failed: {source}")]
    Database { operation: String, source: DbErr },

    #[error("crypto operation '{context}' failed: {message}")]
    Crypto { context: String, message: String },
}

impl InternalError {
    /// Create a Database error for the given store operation
    pub fn database(operation: impl Into<String>, source: DbErr) -> Self {
        InternalError::Database {
            operation: operation.into(),
            source,
        }
    }

    /// Create a Crypto error for the given context
    pub fn crypto(context: impl Into<String>, message: impl std::fmt::Display) -> Self {
        InternalError::Crypto {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
