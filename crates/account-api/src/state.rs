//! Application state for dependency injection.

use std::sync::Arc;

use account_service_lib::AccountService;

use crate::config::AccountApiConfig;
use crate::token::TokenService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountService>,
    pub tokens: Arc<TokenService>,
    pub config: AccountApiConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(accounts: Arc<dyn AccountService>, config: AccountApiConfig) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt));
        Self {
            accounts,
            tokens,
            config,
        }
    }
}
