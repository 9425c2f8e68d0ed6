//! Account service for registration and credential verification.

use tracing::{info, instrument};

use super::AccountError;
use super::models::Account;
use super::repository::AccountRepository;
use crate::auth::password::{hash_password, verify_password};

/// Service for account operations.
#[derive(Debug, Clone)]
pub struct AccountService {
    repo: AccountRepository,
}

impl AccountService {
    /// Create a new account service.
    pub fn new(repo: AccountRepository) -> Self {
        Self { repo }
    }

    /// Register a new account.
    ///
    /// The lookup is a fast path for the common duplicate case; the insert
    /// itself is the authority and fails on the unique constraints when two
    /// registrations race.
    #[instrument(skip(self, secret), fields(username = %username))]
    pub async fn register(
        &self,
        sequence_id: i64,
        username: &str,
        secret: &str,
    ) -> Result<Account, AccountError> {
        if self.repo.get_by_username(username).await?.is_some() {
            return Err(AccountError::Duplicate);
        }

        let password_hash = hash_password(secret).map_err(AccountError::Storage)?;
        let account = self.repo.create(sequence_id, username, &password_hash).await?;
        info!(account_id = account.id, username = %account.username, "Registered new account");

        Ok(account)
    }

    /// Verify a username/secret pair.
    ///
    /// Unknown username and wrong secret both come back as `None` so callers
    /// cannot tell the cases apart.
    #[instrument(skip(self, secret), fields(username = %username))]
    pub async fn verify_credentials(
        &self,
        username: &str,
        secret: &str,
    ) -> Result<Option<Account>, AccountError> {
        let Some(account) = self.repo.get_by_username(username).await? else {
            return Ok(None);
        };

        if verify_password(secret, &account.password_hash) {
            Ok(Some(account))
        } else {
            Ok(None)
        }
    }

    /// Get an account by row id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<Account>, AccountError> {
        self.repo.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup() -> AccountService {
        let db = Database::in_memory().await.unwrap();
        AccountService::new(AccountRepository::new(db.pool().clone()))
    }

    #[tokio::test]
    async fn test_register_and_verify() {
        let service = setup().await;

        let account = service.register(1, "alice", "p@ss1234").await.unwrap();
        assert_eq!(account.username, "alice");
        // Stored hash, not the secret itself
        assert_ne!(account.password_hash, "p@ss1234");

        let verified = service.verify_credentials("alice", "p@ss1234").await.unwrap();
        assert_eq!(verified.unwrap().id, account.id);
    }

    #[tokio::test]
    async fn test_wrong_secret_and_unknown_username_look_alike() {
        let service = setup().await;
        service.register(1, "alice", "p@ss1234").await.unwrap();

        let wrong = service.verify_credentials("alice", "nope").await.unwrap();
        let unknown = service.verify_credentials("mallory", "nope").await.unwrap();
        assert!(wrong.is_none());
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let service = setup().await;
        service.register(1, "alice", "p@ss1234").await.unwrap();

        let err = service.register(2, "alice", "other").await.unwrap_err();
        assert!(matches!(err, AccountError::Duplicate));
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_registration() {
        let service = setup().await;

        let mut handles = Vec::new();
        for i in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.register(1, "alice", &format!("secret{i}")).await
            }));
        }

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AccountError::Duplicate) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 7);
    }
}
