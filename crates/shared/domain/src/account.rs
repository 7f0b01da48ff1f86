//! Account domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ROLE_AUDITOR, ROLE_USER};

/// Account classification carried in the free-form `userType` field.
///
/// `"auditor"` in any letter case is [`AccountRole::Auditor`] and `"user"` in
/// any letter case is [`AccountRole::User`]. Every other value is kept
/// verbatim as [`AccountRole::Other`] and never grants auditor access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountRole {
    User,
    Auditor,
    Other(String),
}

impl AccountRole {
    /// Check if this role may list every account
    pub fn is_auditor(&self) -> bool {
        matches!(self, AccountRole::Auditor)
    }
}

impl From<&str> for AccountRole {
    fn from(s: &str) -> Self {
        AccountRole::from(s.to_string())
    }
}

impl From<String> for AccountRole {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case(ROLE_AUDITOR) {
            AccountRole::Auditor
        } else if s.eq_ignore_ascii_case(ROLE_USER) {
            AccountRole::User
        } else {
            AccountRole::Other(s)
        }
    }
}

impl From<AccountRole> for String {
    fn from(role: AccountRole) -> Self {
        match role {
            AccountRole::Other(raw) => raw,
            known => known.to_string(),
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountRole::Auditor => write!(f, "{}", ROLE_AUDITOR),
            AccountRole::User => write!(f, "{}", ROLE_USER),
            AccountRole::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Account domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: Option<AccountRole>,
    pub last_active: Option<DateTime<Utc>>,
    pub client_ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with no recorded activity
    pub fn new(
        username: String,
        password_hash: String,
        first_name: String,
        last_name: String,
        user_type: Option<AccountRole>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            first_name,
            last_name,
            user_type,
            last_active: None,
            client_ip_address: None,
            created_at: Utc::now(),
        }
    }

    /// Effective role; accounts without a `userType` are plain users
    pub fn role(&self) -> AccountRole {
        self.user_type.clone().unwrap_or(AccountRole::User)
    }

    pub fn is_auditor(&self) -> bool {
        self.user_type.as_ref().is_some_and(AccountRole::is_auditor)
    }
}

/// Login credentials
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Account creation data transfer object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub username: String,
    /// Plain text password, hashed by the account service
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: Option<AccountRole>,
}

/// Partial account update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub username: Option<String>,
    /// Plain text password, re-hashed by the account service
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_type: Option<AccountRole>,
    pub last_active: Option<DateTime<Utc>>,
    pub client_ip_address: Option<String>,
    /// Replace the stored client address even when `client_ip_address` is
    /// `None`. Only set by [`AccountUpdate::activity`].
    #[serde(skip)]
    pub reset_client_ip_address: bool,
}

impl AccountUpdate {
    /// Update that only records activity (login/logout).
    ///
    /// The caller address is always written; an unknown address clears the
    /// previous one.
    pub fn activity(at: DateTime<Utc>, client_ip_address: Option<String>) -> Self {
        Self {
            last_active: Some(at),
            client_ip_address,
            reset_client_ip_address: true,
            ..Self::default()
        }
    }

    /// True when the update carries no changes
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Account response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountResponse {
    /// Unique account identifier
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Account classification, e.g. "auditor"
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "auditor"))]
    pub user_type: Option<AccountRole>,
    /// Last login or logout time
    pub last_active: Option<DateTime<Utc>>,
    /// Address the last login or logout came from
    pub client_ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            first_name: account.first_name,
            last_name: account.last_name,
            user_type: account.user_type,
            last_active: account.last_active,
            client_ip_address: account.client_ip_address,
            created_at: account.created_at,
        }
    }
}
