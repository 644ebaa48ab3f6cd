use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::data::account_repository::AccountStore;
use crate::domain::account::{Account, normalize_email};
use crate::domain::error::DomainError;
use crate::infrastructure::security::PasswordHasher;

/// Create, fetch and update accounts. Holds no mutable state of its own; the
/// store decides races between concurrent requests.
pub struct AccountService<S: AccountStore + ?Sized + 'static> {
    store: Arc<S>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<S> AccountService<S>
where
    S: AccountStore + ?Sized + 'static,
{
    pub fn new(store: Arc<S>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    #[instrument(skip(self, password))]
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Account, DomainError> {
        debug!("create account requested");
        let email = normalize_email(email);

        if self.store.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "account email already in use");
            return Err(DomainError::AccountAlreadyExists(email));
        }

        let mut account = Account::new(email, self.hasher.hash(password));
        account.first_name = first_name;
        account.last_name = last_name;
        let account = self.store.create(account).await?;

        debug!(email = %account.email, "account persisted");
        Ok(account)
    }

    #[instrument(skip(self, password))]
    pub async fn get(&self, email: &str, password: &str) -> Result<Account, DomainError> {
        debug!("get account requested");
        let (normalized, password_hash) = self.authenticate(email, password).await?;

        let account = self
            .store
            .find_by_credentials(&normalized, &password_hash)
            .await?
            .ok_or_else(|| DomainError::InvalidCredentials(email.to_string()))?;

        debug!(email = %account.email, "account requested");
        Ok(account)
    }

    /// Rewrites the stored hash from the credential password on every call;
    /// names are replaced only when supplied.
    #[instrument(skip(self, password))]
    pub async fn update(
        &self,
        email: &str,
        password: &str,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Account, DomainError> {
        debug!("update account requested");
        let (normalized, password_hash) = self.authenticate(email, password).await?;

        let mut account = self
            .store
            .find_by_credentials(&normalized, &password_hash)
            .await?
            .ok_or_else(|| DomainError::InvalidCredentials(email.to_string()))?;

        account.password_hash = password_hash;
        if let Some(first_name) = first_name {
            account.first_name = Some(first_name);
        }
        if let Some(last_name) = last_name {
            account.last_name = Some(last_name);
        }
        let account = self.store.persist(account).await?;

        debug!(email = %account.email, "account updated");
        Ok(account)
    }

    /// Returns the normalized email and the password hash. The credential
    /// error carries the email as the caller sent it.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, String), DomainError> {
        let normalized = normalize_email(email);
        let password_hash = self.hasher.hash(password);

        if !self.store.check_credentials(&normalized, &password_hash).await? {
            warn!(email = %email, "account requested with wrong credentials");
            return Err(DomainError::InvalidCredentials(email.to_string()));
        }

        Ok((normalized, password_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory_repository::InMemoryAccountStore;
    use crate::infrastructure::security::Sha512PasswordHasher;
    use rstest::rstest;

    fn service() -> (AccountService<InMemoryAccountStore>, Arc<InMemoryAccountStore>) {
        let store = Arc::new(InMemoryAccountStore::new());
        let service = AccountService::new(Arc::clone(&store), Arc::new(Sha512PasswordHasher));
        (service, store)
    }

    #[tokio::test]
    async fn create_hashes_password_and_keeps_names() {
        let (service, store) = service();
        let account = service
            .create("a@b.com", "p1", Some("A".into()), None)
            .await
            .unwrap();

        assert_eq!(account.email, "a@b.com");
        assert_eq!(account.first_name.as_deref(), Some("A"));
        assert_eq!(account.last_name, None);
        assert_eq!(account.password_hash, Sha512PasswordHasher.hash("p1"));
        assert_eq!(store.find_by_email("a@b.com").await.unwrap(), Some(account));
    }

    #[rstest]
    #[case("p1", None, None)]
    #[case("other", Some("X"), Some("Y"))]
    #[case("", None, Some("Z"))]
    #[tokio::test]
    async fn create_with_taken_email_is_conflict(
        #[case] password: &str,
        #[case] first_name: Option<&str>,
        #[case] last_name: Option<&str>,
    ) {
        let (service, _) = service();
        service.create("a@b.com", "p1", None, None).await.unwrap();

        let err = service
            .create(
                "A@B.com",
                password,
                first_name.map(String::from),
                last_name.map(String::from),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AccountAlreadyExists(email) if email == "a@b.com"));
    }

    #[tokio::test]
    async fn get_returns_account_for_matching_credentials() {
        let (service, _) = service();
        service
            .create("a@b.com", "p1", Some("A".into()), None)
            .await
            .unwrap();

        let account = service.get("a@b.com", "p1").await.unwrap();
        assert_eq!(account.email, "a@b.com");
        assert_eq!(account.first_name.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn wrong_password_is_credential_error() {
        let (service, _) = service();
        service.create("a@b.com", "p1", None, None).await.unwrap();

        let err = service.get("a@b.com", "wrong").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials(email) if email == "a@b.com"));

        let err = service
            .update("a@b.com", "wrong", Some("A".into()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn credential_error_keeps_the_email_as_sent() {
        let (service, _) = service();
        service.create("a@b.com", "p1", None, None).await.unwrap();

        let err = service.get(" A@B.com", "wrong").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials(email) if email == " A@B.com"));

        let account = service.get("A@B.com", "p1").await.unwrap();
        assert_eq!(account.email, "a@b.com");
    }

    #[tokio::test]
    async fn unknown_email_is_credential_error() {
        let (service, _) = service();
        let err = service.get("nobody@b.com", "p1").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn update_replaces_only_supplied_names() {
        let (service, _) = service();
        service
            .create("a@b.com", "p1", Some("A".into()), Some("L".into()))
            .await
            .unwrap();

        let account = service
            .update("a@b.com", "p1", Some("N".into()), None)
            .await
            .unwrap();
        assert_eq!(account.first_name.as_deref(), Some("N"));
        assert_eq!(account.last_name.as_deref(), Some("L"));
    }

    #[tokio::test]
    async fn update_without_names_rewrites_only_the_hash() {
        let (service, store) = service();
        let created = service
            .create("a@b.com", "p1", Some("A".into()), Some("L".into()))
            .await
            .unwrap();

        let updated = service.update("a@b.com", "p1", None, None).await.unwrap();
        assert_eq!(updated, created);
        assert_eq!(
            store.find_by_email("a@b.com").await.unwrap().unwrap().password_hash,
            Sha512PasswordHasher.hash("p1")
        );
        assert!(service.get("a@b.com", "p1").await.is_ok());
    }
}
