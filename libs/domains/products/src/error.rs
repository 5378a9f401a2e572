use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i32),

    #[error("Path id {path} does not match body id {body}")]
    IdMismatch { path: i32, body: i32 },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    /// The store rejected a write for a row it could not match
    #[error("Concurrent modification of product {0}")]
    Concurrency(i32),

    #[error("Unsupported API version '{0}'")]
    UnsupportedVersion(String),

    #[error("{method} is not allowed for this endpoint in API version {version}")]
    MethodNotAllowed { method: String, version: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::IdMismatch { .. } => AppError::BadRequest(err.to_string()),
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::Concurrency(_) => AppError::InternalServerError(err.to_string()),
            ProductError::UnsupportedVersion(_) => AppError::UnsupportedApiVersion(err.to_string()),
            ProductError::MethodNotAllowed { .. } => AppError::MethodNotAllowed(err.to_string()),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
