//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::account_handler::{
    AuthenticateRequest, AuthenticatedAccount, RegisterRequest, UpdateAccountRequest,
};
use crate::handlers::health_handler::HealthResponse;
use domain::AccountResponse;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::account_handler::authenticate,
        crate::handlers::account_handler::register,
        crate::handlers::account_handler::get_auditors,
        crate::handlers::account_handler::logout,
        crate::handlers::account_handler::get_all,
        crate::handlers::account_handler::get_current,
        crate::handlers::account_handler::get_by_id,
        crate::handlers::account_handler::update,
        crate::handlers::account_handler::delete,
    ),
    components(
        schemas(
            AuthenticateRequest,
            AuthenticatedAccount,
            RegisterRequest,
            UpdateAccountRequest,
            AccountResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Accounts", description = "Account authentication and management"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
