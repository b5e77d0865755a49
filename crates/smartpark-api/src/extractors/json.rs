//! JSON body extractor that runs `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use smartpark_core::error::AppError;

use crate::error::ApiError;

/// A deserialized and validated JSON body.
///
/// Malformed JSON, missing fields, and failed rules all become 400s.
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
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::validation(first_message(&errors)))?;

        Ok(Self(value))
    }
}

/// The first failing rule's message, or a field summary if it has none.
fn first_message(errors: &validator::ValidationErrors) -> String {
    for (field, errs) in errors.field_errors() {
        if let Some(e) = errs.first() {
            return match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {field}"),
            };
        }
    }
    "Invalid request body".to_string()
}
