//! Account API Library
//!
//! HTTP routes that translate account requests into account-service calls.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod token;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use account_service_lib::AccountManager;

use crate::config::AccountApiConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server backed by the in-memory account service.
pub async fn run_server(config: AccountApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let accounts = Arc::new(AccountManager::in_memory());

    // Build address
    let addr: SocketAddr = config.service.bind_address().parse()?;

    let state = AppState::new(accounts, config);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    info!("Account API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
