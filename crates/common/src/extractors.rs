//! Custom axum extractors for Keystead

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::Error;

/// JSON extractor that runs `validator` rules on the deserialized value.
///
/// Replaces `Json<T>` + manual `.validate()` calls in handlers. Malformed
/// JSON and failed validation both reject as `INVALID_ARGUMENT`, so every
/// input error reaches the caller through the same taxonomy.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| Error::InvalidArgument(e.body_text()))?;

        value
            .validate()
            .map_err(|e| Error::InvalidArgument(format!("Validation failed: {}", e)))?;

        Ok(ValidatedJson(value))
    }
}
