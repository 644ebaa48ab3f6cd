//! HTTP client for the `/account` resource.

use serde::{Deserialize, Serialize};
use std::fmt;

mod error;
mod http_client;

pub use error::AccountClientError;
pub use http_client::AccountClient;

/// Account as returned by the server. The password is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (first name: {}, last name: {})",
            self.email,
            self.first_name.as_deref().unwrap_or("-"),
            self.last_name.as_deref().unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_json() {
        let account: Account =
            serde_json::from_str(r#"{"email":"a@b.com","firstName":"A","lastName":null}"#)
                .unwrap();
        assert_eq!(account.first_name.as_deref(), Some("A"));
        assert_eq!(account.last_name, None);
        assert_eq!(account.to_string(), "a@b.com (first name: A, last name: -)");
    }
}
