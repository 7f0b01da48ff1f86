//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod account;
pub mod constants;
pub mod error;
pub mod password;

pub use account::{Account, AccountResponse, AccountRole, AccountUpdate, Credentials, NewAccount};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
