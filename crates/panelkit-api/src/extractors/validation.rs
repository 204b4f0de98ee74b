//! JSON body extraction with validation applied before the handler runs.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use panelkit_core::error::AppError;

use crate::error::ApiError;

/// Like [`Json`], but runs `validator` rules and rejects with a 400
/// naming the first failing field.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;

        value
            .validate()
            .map_err(|e| AppError::validation(first_violation(&e)))?;

        Ok(Self(value))
    }
}

/// One readable message from a validation report.
fn first_violation(errors: &validator::ValidationErrors) -> String {
    for (field, violations) in errors.field_errors() {
        if let Some(violation) = violations.first() {
            return match &violation.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for field: {field}"),
            };
        }
    }
    "Request validation failed".to_string()
}
