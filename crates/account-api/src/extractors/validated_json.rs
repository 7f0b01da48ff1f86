//! JSON body extractor with field validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use common::AppError;

/// Request body that has been deserialized and passed [`Validate`].
///
/// Any failure becomes [`AppError::Validation`], so clients always receive
/// the `{"message": ...}` error shape.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_message)?;

        value
            .validate()
            .map_err(|errors| AppError::validation(first_message(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_message(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::validation("Expected a JSON request body")
        }
        other => AppError::validation(other.body_text()),
    }
}

/// Message of the alphabetically first failing field, so repeated requests
/// report the same problem.
fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .find_map(|(field, errors)| {
            errors.first().map(|error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {}", field),
            })
        })
        .unwrap_or_else(|| "Validation failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{self, header::CONTENT_TYPE}};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Login {
        #[validate(length(min = 1, message = "Username is required"))]
        username: String,
        #[validate(length(min = 1, message = "Password is required"))]
        password: String,
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<Login, AppError> {
        let mut builder = http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        ValidatedJson::<Login>::from_request(request, &())
            .await
            .map(|ValidatedJson(login)| login)
    }

    #[tokio::test]
    async fn test_valid_body() {
        let login = extract(Some("application/json"), r#"{"username":"jdoe","password":"pw"}"#)
            .await
            .unwrap();
        assert_eq!(login.username, "jdoe");
    }

    #[tokio::test]
    async fn test_first_failing_field_reported() {
        let err = extract(Some("application/json"), r#"{"username":"","password":""}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Password is required"));
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let err = extract(None, r#"{"username":"jdoe","password":"pw"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Expected a JSON request body"));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let err = extract(Some("application/json"), "{not json").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
