//! Repository layer for data access.

mod account_repository;

pub use account_repository::{AccountRepository, MemoryAccountStore};

#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::MockAccountRepository;
