use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::shared::types::{ApiResponse, FieldError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate coordinate: ({latitude}, {longitude})")]
    DuplicateCoordinate { latitude: f64, longitude: f64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Single-field validation failure
    pub fn invalid(field: impl Into<String>, error: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, error)])
    }

    /// Error kind reported in the `type` field of the response envelope
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NotFound",
            AppError::DuplicateCoordinate { .. } => "DuplicateCoordinate",
            AppError::Conflict(_) => "Conflict",
            AppError::Validation(_) => "ValidationError",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Database(_) | AppError::Internal(_) => "InternalError",
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    FieldError::new(field.clone(), message)
                })
            })
            .collect();
        // HashMap iteration order is random
        fields.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.error.cmp(&b.error)));
        AppError::Validation(fields)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.error))
        .collect::<Vec<_>>()
        .join("; ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::DuplicateCoordinate { .. } => (
                StatusCode::CONFLICT,
                "Address with the same latitude and longitude already exists".to_string(),
                None,
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Schema validation error".to_string(),
                Some(errors),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(status.as_u16(), kind, message, errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
