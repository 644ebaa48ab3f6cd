use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("account already exists: {0}")]
    AccountAlreadyExists(String),
    #[error("invalid credentials for account: {0}")]
    InvalidCredentials(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::AccountAlreadyExists(_) => StatusCode::FORBIDDEN,
            DomainError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        let details = match self {
            DomainError::AccountAlreadyExists(_) => {
                Some(json!({ "message": "This mail address is already used." }))
            }
            DomainError::InvalidCredentials(email) => Some(json!({ "email": email })),
            _ => None,
        };
        let body = ErrorBody {
            error: message.as_str(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
