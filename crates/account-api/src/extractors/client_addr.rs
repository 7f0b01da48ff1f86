//! Caller address extractor.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header::ORIGIN, request::Parts},
};

/// Address the request came from.
///
/// The peer IP of the connection wins; without connection info the `Origin`
/// header is used. `None` when neither is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddr(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ConnectInfo(addr)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            return Ok(ClientAddr(Some(addr.ip().to_string())));
        }

        let origin = parts
            .headers
            .get(ORIGIN)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);

        Ok(ClientAddr(origin))
    }
}
