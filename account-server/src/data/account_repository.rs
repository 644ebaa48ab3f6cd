use crate::domain::account::Account;
use crate::domain::error::DomainError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error, info};

/// Durable account storage. Emails passed in are already normalized.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account, failing with `AccountAlreadyExists` when the
    /// email is taken.
    async fn create(&self, account: Account) -> Result<Account, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;
    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Account>, DomainError>;
    async fn check_credentials(&self, email: &str, password_hash: &str)
    -> Result<bool, DomainError>;
    /// Insert or update by email.
    async fn persist(&self, account: Account) -> Result<Account, DomainError>;
}

#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (email, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .map(|db| db.is_unique_violation())
                == Some(true)
            {
                DomainError::AccountAlreadyExists(account.email.clone())
            } else {
                error!("failed to create account: {}", e);
                DomainError::Internal(format!("database error: {}", e))
            }
        })?;

        info!(email = %account.email, "account created");
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT email, password_hash, first_name, last_name
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find account by email {}: {}", email, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Account>, DomainError> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT email, password_hash, first_name, last_name
            FROM accounts
            WHERE email = $1 AND password_hash = $2
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find account by credentials {}: {}", email, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn check_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM accounts WHERE email = $1 AND password_hash = $2
            )
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to check credentials for {}: {}", email, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn persist(&self, account: Account) -> Result<Account, DomainError> {
        let saved = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE
            SET password_hash = EXCLUDED.password_hash,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                updated_at = now()
            RETURNING email, password_hash, first_name, last_name
            "#,
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to persist account {}: {}", account.email, e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        debug!(email = %saved.email, "account persisted");
        Ok(saved)
    }
}
