use crate::Account;
use crate::error::AccountClientError;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

const PASSWORD_HEADER: &str = "password";

#[derive(Clone)]
pub struct AccountClient {
    client: Arc<Client>,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountQuery<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
}

impl AccountClient {
    pub fn connect(endpoint: &str) -> Result<Self, AccountClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            client: Arc::new(Client::builder().build()?),
            base_url,
        })
    }

    pub fn account_url(&self) -> String {
        format!("{}/account/", self.base_url)
    }

    pub async fn create(
        &self,
        email: &str,
        password: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<Account, AccountClientError> {
        debug!(email, "creating account");
        let resp = self
            .client
            .post(self.account_url())
            .query(&AccountQuery {
                email,
                password: Some(password),
                first_name,
                last_name,
            })
            .send()
            .await?;

        Self::read_account(resp).await
    }

    pub async fn get(&self, email: &str, password: &str) -> Result<Account, AccountClientError> {
        debug!(email, "fetching account");
        let resp = self
            .client
            .get(self.account_url())
            .query(&AccountQuery {
                email,
                password: None,
                first_name: None,
                last_name: None,
            })
            .header(PASSWORD_HEADER, password)
            .send()
            .await?;

        Self::read_account(resp).await
    }

    pub async fn update(
        &self,
        email: &str,
        password: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<Account, AccountClientError> {
        debug!(email, "updating account");
        let resp = self
            .client
            .put(self.account_url())
            .query(&AccountQuery {
                email,
                password: None,
                first_name,
                last_name,
            })
            .header(PASSWORD_HEADER, password)
            .send()
            .await?;

        Self::read_account(resp).await
    }

    async fn read_account(resp: reqwest::Response) -> Result<Account, AccountClientError> {
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(AccountClientError::from_http_response(resp).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_url_ignores_trailing_slash() {
        let client = AccountClient::connect("http://127.0.0.1:8080/").unwrap();
        assert_eq!(client.account_url(), "http://127.0.0.1:8080/account/");
    }

    #[test]
    fn query_skips_absent_fields() {
        let query = AccountQuery {
            email: "a@b.com",
            password: None,
            first_name: Some("A"),
            last_name: None,
        };
        let encoded = serde_json::to_value(&query).unwrap();
        assert_eq!(encoded, serde_json::json!({ "email": "a@b.com", "firstName": "A" }));
    }

    #[tokio::test]
    async fn unreachable_server_is_request_error() {
        let client = AccountClient::connect("http://127.0.0.1:9").unwrap();
        let err = client.get("a@b.com", "p1").await.unwrap_err();
        assert!(matches!(err, AccountClientError::RequestError(_)));
    }
}
