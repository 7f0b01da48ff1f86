//! Route configuration.

use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{account_routes, health_routes, public_account_routes};
use crate::middleware::identity_middleware;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        // Health check (no identity)
        .nest("/health", health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Login and registration ignore any bearer token; the rest resolve
        // identity when one is sent
        .nest(
            "/users",
            account_routes()
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    identity_middleware,
                ))
                .merge(public_account_routes()),
        );

    let router = if state.config.cors_allow_any {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}
