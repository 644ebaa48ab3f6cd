use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::data::account_repository::AccountStore;
use crate::domain::account::Account;
use crate::domain::error::DomainError;

/// Process-local store keyed by email. Used with `STORE=memory` and in tests.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;
        match accounts.entry(account.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::AccountAlreadyExists(account.email)),
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
                debug!(email = %account.email, "account created");
                Ok(account)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Account>, DomainError> {
        Ok(self
            .accounts
            .read()
            .await
            .get(email)
            .filter(|account| account.password_hash == password_hash)
            .cloned())
    }

    async fn check_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        Ok(self.find_by_credentials(email, password_hash).await?.is_some())
    }

    async fn persist(&self, account: Account) -> Result<Account, DomainError> {
        self.accounts
            .write()
            .await
            .insert(account.email.clone(), account.clone());
        Ok(account)
    }
}
