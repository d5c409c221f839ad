use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::shared::constants::{DEFAULT_LIMIT, DEFAULT_PAGE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// HTTP status code, set on error responses only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Error kind, set on error responses only
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<FieldError>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error: error.into(),
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Pagination query parameters shared by list endpoints.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    #[validate(range(min = 1, message = "page must be greater than or equal to 1"))]
    pub page: i64,

    /// Number of items per page (default: 10)
    #[serde(default = "default_limit")]
    #[param(minimum = 1)]
    #[validate(range(min = 1, message = "limit must be greater than or equal to 1"))]
    pub limit: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PaginationQuery {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Calculate SQL OFFSET from page number, saturating past the last row
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    pub fn limit(&self) -> i64 {
        self.limit.max(1)
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            status: None,
            kind: None,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(
        status: u16,
        kind: &str,
        message: String,
        errors: Option<Vec<FieldError>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            status: Some(status),
            kind: Some(kind.to_string()),
            data: None,
            message: Some(message),
            meta: None,
            errors,
        }
    }
}
