//! Account repository and its in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::Account;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account repository trait for dependency injection.
///
/// Usernames are unique: `insert` and `save` reject a username already held
/// by a different account.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Find account by exact username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// List all accounts, oldest first
    async fn list(&self) -> AppResult<Vec<Account>>;

    /// Store a new account
    async fn insert(&self, account: Account) -> AppResult<Account>;

    /// Replace an existing account
    async fn save(&self, account: Account) -> AppResult<Account>;

    /// Remove account by ID, returning whether it existed
    async fn remove(&self, id: Uuid) -> AppResult<bool>;
}

/// Process-local account storage.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl MemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn username_taken(username: &str) -> AppError {
    AppError::conflict(format!("Username \"{}\" is already taken", username))
}

#[async_trait]
impl AccountRepository for MemoryAccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.username == username).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by_key(|a| a.created_at);
        Ok(accounts)
    }

    async fn insert(&self, account: Account) -> AppResult<Account> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.username == account.username) {
            return Err(username_taken(&account.username));
        }
        if accounts.contains_key(&account.id) {
            return Err(AppError::conflict(format!("Account {} already exists", account.id)));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn save(&self, account: Account) -> AppResult<Account> {
        let mut accounts = self.accounts.write().await;
        if !accounts.contains_key(&account.id) {
            return Err(AppError::NotFound);
        }
        if accounts
            .values()
            .any(|a| a.id != account.id && a.username == account.username)
        {
            return Err(username_taken(&account.username));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn remove(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.accounts.write().await.remove(&id).is_some())
    }
}
