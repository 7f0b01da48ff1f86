//! Account Service Library
//!
//! The account-service contract consumed by the HTTP router, plus a
//! repository-backed implementation that keeps accounts in process memory.

pub mod repository;
pub mod service;

pub use repository::{AccountRepository, MemoryAccountStore};
pub use service::{AccountManager, AccountService};

#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockAccountRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use service::MockAccountService;
