//! Caller identity middleware.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use common::AppError;
use domain::AccountRole;

use crate::state::AppState;

/// Authenticated caller, attached to the request by [`identity_middleware`].
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub subject: Uuid,
    pub username: String,
    pub role: AccountRole,
}

/// Resolves a bearer token into a [`CallerIdentity`].
///
/// Requests without an `Authorization` header pass through anonymously;
/// a token that fails verification is rejected with 401.
pub async fn identity_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(TypedHeader(Authorization(bearer))) = bearer {
        let claims = state.tokens.verify(bearer.token())?;

        request.extensions_mut().insert(CallerIdentity {
            subject: claims.sub,
            username: claims.username,
            role: AccountRole::from(claims.role),
        });
    }

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
