//! Account service - Handles account-related business logic.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Account, AccountUpdate, Credentials, NewAccount, Password};

use crate::repository::{AccountRepository, MemoryAccountStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account service contract consumed by the HTTP layer.
///
/// Lookups return `Ok(None)` for unknown accounts; errors are reserved for
/// failures of the service itself.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Verify credentials, returning the matching account
    async fn authenticate(&self, credentials: Credentials) -> AppResult<Option<Account>>;

    /// Register a new account
    async fn create(&self, account: NewAccount) -> AppResult<()>;

    /// List every account
    async fn get_all(&self) -> AppResult<Vec<Account>>;

    /// Get account by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Apply a partial update
    async fn update(&self, id: Uuid, changes: AccountUpdate) -> AppResult<()>;

    /// Remove account; removing an unknown ID succeeds
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of AccountService using a repository.
pub struct AccountManager {
    repo: Arc<dyn AccountRepository>,
}

impl AccountManager {
    /// Create new account service instance with repository
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self {
        Self { repo }
    }

    /// Account service backed by a fresh [`MemoryAccountStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryAccountStore::new()))
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn authenticate(&self, credentials: Credentials) -> AppResult<Option<Account>> {
        let account = self.repo.find_by_username(&credentials.username).await?;

        // Unknown usernames still pay for one verification.
        let stored = match &account {
            Some(account) => Password::from_hash(account.password_hash.as_str()),
            None => Password::dummy(),
        };
        let password_valid = stored.verify(&credentials.password);

        Ok(account.filter(|_| password_valid))
    }

    async fn create(&self, new: NewAccount) -> AppResult<()> {
        if self.repo.find_by_username(&new.username).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Username \"{}\" is already taken",
                new.username
            )));
        }

        let password_hash = Password::new(&new.password)?.into_string();
        let account = Account::new(
            new.username,
            password_hash,
            new.first_name,
            new.last_name,
            new.user_type,
        );

        let account = self.repo.insert(account).await?;
        info!(account_id = %account.id, username = %account.username, "Account created");
        Ok(())
    }

    async fn get_all(&self) -> AppResult<Vec<Account>> {
        self.repo.list().await
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        self.repo.find_by_id(id).await
    }

    async fn update(&self, id: Uuid, changes: AccountUpdate) -> AppResult<()> {
        let mut account = self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        if changes.is_empty() {
            debug!(account_id = %id, "Empty update, nothing to save");
            return Ok(());
        }

        if let Some(username) = changes.username {
            account.username = username;
        }
        if let Some(password) = changes.password {
            account.password_hash = Password::new(&password)?.into_string();
        }
        if let Some(first_name) = changes.first_name {
            account.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            account.last_name = last_name;
        }
        if let Some(user_type) = changes.user_type {
            account.user_type = Some(user_type);
        }
        if let Some(last_active) = changes.last_active {
            account.last_active = Some(last_active);
        }
        if changes.client_ip_address.is_some() || changes.reset_client_ip_address {
            account.client_ip_address = changes.client_ip_address;
        }

        self.repo.save(account).await?;
        debug!(account_id = %id, "Account updated");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let existed = self.repo.remove(id).await?;
        debug!(account_id = %id, existed, "Account deleted");
        Ok(())
    }
}
