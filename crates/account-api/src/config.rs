//! Account API configuration.

use std::env;

use tracing::warn;

use common::{JwtConfig, ServiceConfig};
use domain::{DEFAULT_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH};

/// Secret used when `JWT_SECRET` is unset. Development only.
const DEV_JWT_SECRET: &str = "account-api-development-secret-change-me";

/// Account API configuration.
#[derive(Debug, Clone)]
pub struct AccountApiConfig {
    /// Bind address and service name
    pub service: ServiceConfig,
    /// Token signing settings
    pub jwt: JwtConfig,
    /// Allow cross-origin requests from any origin
    pub cors_allow_any: bool,
}

impl AccountApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secret = match env::var("JWT_SECRET") {
            Ok(secret) => {
                if secret.len() < MIN_JWT_SECRET_LENGTH {
                    warn!(
                        "JWT_SECRET is shorter than {} characters",
                        MIN_JWT_SECRET_LENGTH
                    );
                }
                secret
            }
            Err(_) => {
                warn!("JWT_SECRET not set, using the development secret");
                defaults.jwt.secret
            }
        };

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                host: env::var("API_HOST").unwrap_or(defaults.service.host),
                port: env::var("API_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.service.port),
            },
            jwt: JwtConfig {
                secret,
                expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                    .ok()
                    .and_then(|h| h.parse().ok())
                    .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            },
            cors_allow_any: env::var("CORS_ALLOW_ANY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cors_allow_any),
        }
    }
}

impl Default for AccountApiConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            jwt: JwtConfig {
                secret: DEV_JWT_SECRET.to_string(),
                expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            },
            cors_allow_any: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AccountApiConfig::default();
        assert_eq!(config.service.port, 4000);
        assert_eq!(config.jwt.expiration_hours, DEFAULT_JWT_EXPIRATION_HOURS);
        assert!(config.jwt.secret.len() >= MIN_JWT_SECRET_LENGTH);
        assert!(config.cors_allow_any);
    }
}
