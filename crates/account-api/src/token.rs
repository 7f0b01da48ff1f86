//! Bearer token issuing and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppResult, JwtConfig};
use domain::Account;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// HS256 token service.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expiration_hours: config.expiration_hours,
        }
    }

    /// Sign a token identifying `account`.
    pub fn issue(&self, account: &Account) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: account.id,
            username: account.username.clone(),
            role: account.role().to_string(),
            exp: (now + Duration::hours(self.expiration_hours)).timestamp(),
            iat: now.timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;
    use domain::AccountRole;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiration_hours: 1,
        }
    }

    fn account() -> Account {
        Account::new(
            "auditor1".to_string(),
            String::new(),
            "Ada".to_string(),
            "Lovelace".to_string(),
            Some(AccountRole::Auditor),
        )
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = TokenService::new(&config("test-secret-key-for-testing-only-32chars"));
        let account = account();

        let token = tokens.issue(&account).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.sub, account.id);
        assert_eq!(claims.username, "auditor1");
        assert_eq!(claims.role, "auditor");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let ours = TokenService::new(&config("test-secret-key-for-testing-only-32chars"));
        let theirs = TokenService::new(&config("another-secret-key-for-testing-32chars"));

        let token = theirs.issue(&account()).unwrap();
        assert!(matches!(ours.verify(&token), Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = TokenService::new(&JwtConfig {
            secret: "test-secret-key-for-testing-only-32chars".to_string(),
            expiration_hours: -2,
        });

        let token = tokens.issue(&account()).unwrap();
        assert!(tokens.verify(&token).is_err());
    }
}
