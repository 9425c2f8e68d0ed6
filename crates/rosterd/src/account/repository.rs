//! Account repository for database operations.

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::instrument;

use super::AccountError;
use super::models::Account;
use crate::db::is_unique_violation;

/// Repository for account database operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account.
    ///
    /// Uniqueness of username and sequence id is enforced by the storage
    /// constraints, so concurrent duplicate registrations fail here instead
    /// of racing a lookup.
    #[instrument(skip(self, password_hash), fields(username = %username))]
    pub async fn create(
        &self,
        sequence_id: i64,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, AccountError> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (sequence_id, username, password_hash)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(sequence_id)
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                let id = done.last_insert_rowid();
                self.get(id).await?.ok_or_else(|| {
                    AccountError::Storage(anyhow::anyhow!("account not found after insert"))
                })
            }
            Err(e) if is_unique_violation(&e) => Err(AccountError::Duplicate),
            Err(e) => Err(AccountError::Storage(
                anyhow::Error::new(e).context("inserting account"),
            )),
        }
    }

    /// Get an account by row id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<Account>, AccountError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, sequence_id, username, password_hash, created_at
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("fetching account")?;

        Ok(account)
    }

    /// Get an account by username.
    #[instrument(skip(self))]
    pub async fn get_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, sequence_id, username, password_hash, created_at
            FROM accounts
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .context("fetching account by username")?;

        Ok(account)
    }

    /// Count total accounts.
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<i64, AccountError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .context("counting accounts")?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup() -> AccountRepository {
        let db = Database::in_memory().await.unwrap();
        AccountRepository::new(db.pool().clone())
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = setup().await;

        let account = repo.create(1, "alice", "hashed").await.unwrap();
        assert_eq!(account.sequence_id, 1);
        assert_eq!(account.username, "alice");
        assert_eq!(account.password_hash, "hashed");

        let by_id = repo.get(account.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");

        let by_username = repo.get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_username.id, account.id);

        assert!(repo.get_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = setup().await;

        repo.create(1, "alice", "h1").await.unwrap();
        let err = repo.create(2, "alice", "h2").await.unwrap_err();
        assert!(matches!(err, AccountError::Duplicate));

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_sequence_id_rejected() {
        let repo = setup().await;

        repo.create(1, "alice", "h1").await.unwrap();
        let err = repo.create(1, "bob", "h2").await.unwrap_err();
        assert!(matches!(err, AccountError::Duplicate));
    }
}
