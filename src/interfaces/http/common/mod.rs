//! Shared HTTP types: response envelope, field errors, validated extractors

mod validated_query;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

pub use validated_query::{QueryLimits, ValidateQuery, ValidatedQuery, ValidatedQueryRejection};

/// Standard API envelope for errors and non-listing endpoints.
///
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "message"}`, with `data`
/// carrying per-field details for validation failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Payload; field errors when validation fails
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Failure that still carries detail in `data`.
    pub fn rejected(message: impl Into<String>, detail: T) -> Self {
        Self {
            success: false,
            data: Some(detail),
            error: Some(message.into()),
        }
    }
}

/// One failed constraint on a query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Query-string key, e.g. `perPage`
    pub field: String,
    /// Machine-readable code, e.g. `invalid_number`
    pub code: String,
    pub message: String,
}

/// Flatten `validator` errors into a stable, field-sorted list.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                code: e.code.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}
