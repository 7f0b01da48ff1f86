//! Path parameter extractor with JSON error bodies.

use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use common::AppError;

/// Path parameters deserialized like [`Path`], but a malformed value becomes
/// [`AppError::Validation`] instead of a plain text 400.
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(rejection_message)?;

        Ok(ValidatedPath(value))
    }
}

fn rejection_message(rejection: PathRejection) -> AppError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(e) => AppError::validation(e.body_text()),
        // Route declared without the parameter the handler asks for
        other => AppError::internal(other.body_text()),
    }
}
