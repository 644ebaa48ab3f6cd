use sqlx::FromRow;

/// A persisted account. The email is the identity and never changes once the
/// account exists.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Account {
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Account {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            email,
            password_hash,
            first_name: None,
            last_name: None,
        }
    }
}

/// Normalize an email for lookup and uniqueness checks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
