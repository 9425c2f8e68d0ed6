//! Account storage and credential checks.

pub mod models;
mod repository;
mod service;

pub use models::{Account, LoginRequest, RegisterRequest};
pub use repository::AccountRepository;
pub use service::AccountService;

/// Domain errors for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Username or sequence id already taken. Deliberately cause-agnostic so
    /// responses never reveal which field conflicted.
    #[error("user already exists")]
    Duplicate,

    /// Storage failure.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
