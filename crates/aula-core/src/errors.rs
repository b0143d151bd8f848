//! Application error type shared by every layer of the API.
//!
//! Every failure is reported to the caller of the single operation that raised
//! it; nothing is retried. The status code carries the error class:
//!
//! | class | status |
//! |-------|--------|
//! | validation error | 422 |
//! | constraint violation | 409 |
//! | not found | 404 |
//! | bad request | 400 |
//! | unauthorized / forbidden | 401 / 403 |
//! | internal | 500 |

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, anyhow::anyhow!(message))
    }

    /// A required field is missing or a field value is not acceptable.
    pub fn validation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    /// A uniqueness, foreign-key or check rule was broken at the store.
    pub fn constraint_violation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }

    /// Builds a validation error from `validator` field errors.
    pub fn from_validation_errors(errors: &ValidationErrors) -> Self {
        Self::validation(anyhow::anyhow!("{}", format_validation_errors(errors)))
    }

    pub fn is_validation(&self) -> bool {
        self.status == StatusCode::UNPROCESSABLE_ENTITY
    }

    pub fn is_constraint_violation(&self) -> bool {
        self.status == StatusCode::CONFLICT
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }
}

/// Flattens `validator` errors, nested structs included, into one readable
/// line.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, &mut messages);
    messages.sort();
    messages.join(", ")
}

fn collect_messages(errors: &ValidationErrors, messages: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(errors) => {
                messages.extend(errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, messages),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, messages);
                }
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.error, self.status)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.error, "Request failed");
        }

        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(range(min = 1))]
        cycle: i32,
    }

    #[test]
    fn test_status_classes() {
        assert!(AppError::validation(anyhow::anyhow!("x")).is_validation());
        assert!(AppError::constraint_violation(anyhow::anyhow!("x")).is_constraint_violation());
        assert!(AppError::not_found(anyhow::anyhow!("x")).is_not_found());
        assert_eq!(
            AppError::unauthorized("no".to_string()).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::forbidden("no".to_string()).status,
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_blanket_from_is_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_format_validation_errors_uses_messages_and_field_fallback() {
        let sample = Sample {
            name: String::new(),
            cycle: 0,
        };
        let errors = sample.validate().unwrap_err();
        let formatted = format_validation_errors(&errors);

        assert!(formatted.contains("name is required"));
        assert!(formatted.contains("cycle is invalid"));
    }

    #[test]
    fn test_from_validation_errors_is_unprocessable() {
        let sample = Sample {
            name: String::new(),
            cycle: 3,
        };
        let err = AppError::from_validation_errors(&sample.validate().unwrap_err());
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error.to_string(), "name is required");
    }
}
