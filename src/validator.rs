//! Extractors that deserialize a request body and run `validator` rules.
//!
//! Malformed bodies are rejected with 400. A body that parses but carries an
//! unacceptable value (an unknown course code, a grade outside "1".."10", a
//! field failing its `#[validate]` rule) is rejected with 422.

use anyhow::anyhow;
use axum::{
    Form, Json,
    extract::{
        FromRequest, Request,
        rejection::{FormRejection, JsonRejection},
    },
};
use serde::de::DeserializeOwned;
use validator::Validate;

use aula_core::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedForm<T>(pub T);

fn missing_field(message: &str) -> Option<&str> {
    message
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
}

/// The serde message without axum's "Failed to deserialize ..." prefix.
fn serde_message(body_text: &str) -> &str {
    body_text
        .split_once(": ")
        .map(|(_, message)| message)
        .unwrap_or(body_text)
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if let Some(field) = missing_field(&error_msg) {
        return AppError::bad_request(anyhow!("{} is required", field));
    }

    match rejection {
        JsonRejection::MissingJsonContentType(_) => AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        )),
        JsonRejection::JsonDataError(_) if error_msg.contains("invalid type") => {
            AppError::bad_request(anyhow!("Invalid field type in request"))
        }
        JsonRejection::JsonDataError(_) => {
            AppError::validation(anyhow!("{}", serde_message(&error_msg)))
        }
        _ => AppError::bad_request(anyhow!("Invalid request body")),
    }
}

fn form_rejection(rejection: FormRejection) -> AppError {
    let error_msg = rejection.body_text();

    if let Some(field) = missing_field(&error_msg) {
        return AppError::bad_request(anyhow!("{} is required", field));
    }

    match rejection {
        FormRejection::InvalidFormContentType(_) => AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/x-www-form-urlencoded' header"
        )),
        FormRejection::FailedToDeserializeFormBody(_) => {
            AppError::validation(anyhow!("{}", serde_message(&error_msg)))
        }
        _ => AppError::bad_request(anyhow!("Invalid form body")),
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value
            .validate()
            .map_err(|errors| AppError::from_validation_errors(&errors))?;

        Ok(ValidatedJson(value))
    }
}

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(form_rejection)?;

        value
            .validate()
            .map_err(|errors| AppError::from_validation_errors(&errors))?;

        Ok(ValidatedForm(value))
    }
}
