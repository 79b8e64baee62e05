//! Validated query-string extractor for Axum
//!
//! `ValidatedQuery<T>` deserializes the query string into a raw, all-string
//! type `T` and converts it into `T::Output` through [`ValidateQuery`].
//! An undecodable query string is a 400; failed conversions are a 422 with
//! one entry per failed field.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRef, FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::ValidationErrors;

use super::{field_errors, ApiResponse, FieldError};

/// Server-side bounds applied while validating query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryLimits {
    /// Largest accepted page size; unbounded when `None`
    pub max_per_page: Option<u64>,
}

/// Conversion from a raw query struct into typed parameters.
///
/// Implementations collect every field error before returning, so a client
/// sees all problems in one response.
pub trait ValidateQuery: DeserializeOwned {
    type Output;

    fn validate_query(self, limits: &QueryLimits) -> Result<Self::Output, ValidationErrors>;
}

pub struct ValidatedQuery<T: ValidateQuery>(pub T::Output);

pub enum ValidatedQueryRejection {
    /// Query string could not be decoded at all.
    QueryError(QueryRejection),
    /// Decoded, but one or more parameters are invalid.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedQueryRejection {
    fn into_response(self) -> Response {
        match self {
            Self::QueryError(rejection) => {
                let body = ApiResponse::<()>::error(format!("Invalid query string: {}", rejection));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::ValidationError(errors) => {
                let fields = field_errors(&errors);
                let message = if fields.is_empty() {
                    "Validation failed".to_string()
                } else {
                    fields
                        .iter()
                        .map(|f| format!("{}: {}", f.field, f.message))
                        .collect::<Vec<_>>()
                        .join("; ")
                };

                let body = ApiResponse::<Vec<FieldError>>::rejected(message, fields);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: ValidateQuery,
    S: Send + Sync,
    QueryLimits: FromRef<S>,
{
    type Rejection = ValidatedQueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidatedQueryRejection::QueryError)?;

        let limits = QueryLimits::from_ref(state);
        raw.validate_query(&limits)
            .map(ValidatedQuery)
            .map_err(ValidatedQueryRejection::ValidationError)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use serde::Deserialize;
    use validator::ValidationError;

    #[derive(Debug, Deserialize)]
    struct RawWindow {
        size: Option<String>,
        label: Option<String>,
    }

    impl ValidateQuery for RawWindow {
        type Output = (u64, String);

        fn validate_query(self, limits: &QueryLimits) -> Result<Self::Output, ValidationErrors> {
            let mut errors = ValidationErrors::new();
            let size = match self.size.as_deref().map(str::parse::<u64>) {
                Some(Ok(n)) if limits.max_per_page.map_or(true, |max| n <= max) => n,
                None => 1,
                _ => {
                    errors.add("size", ValidationError::new("out_of_range"));
                    0
                }
            };
            let label = self.label.unwrap_or_default();
            if label.len() > 5 {
                errors.add(
                    "label",
                    ValidationError::new("too_long").with_message("at most 5 characters".into()),
                );
            }
            if errors.is_empty() {
                Ok((size, label))
            } else {
                Err(errors)
            }
        }
    }

    async fn handler(ValidatedQuery((size, label)): ValidatedQuery<RawWindow>) -> String {
        format!("{size}:{label}")
    }

    fn app() -> Router {
        Router::new()
            .route("/test", get(handler))
            .with_state(QueryLimits { max_per_page: Some(10) })
    }

    async fn send(uri: &str) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app().into_service();
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        svc.call(req).await.unwrap()
    }

    async fn json_body(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_query_returns_ok() {
        let resp = send("/test?size=4&label=ab").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"4:ab");
    }

    #[tokio::test]
    async fn undecodable_query_returns_400() {
        // Repeated scalar key cannot deserialize into Option<String>.
        let resp = send("/test?size=1&size=2").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn all_field_errors_are_reported_together() {
        let resp = send("/test?size=11&label=toolong").await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(resp).await;
        assert_eq!(body["success"], false);
        let fields: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["label", "size"]);
        assert!(body["error"].as_str().unwrap().contains("at most 5 characters"));
    }
}
