use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountClientError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Account already exists: {0}")]
    Conflict(String),
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl AccountClientError {
    pub(crate) async fn from_http_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        let text = match resp.text().await {
            Ok(text) => text,
            Err(err) => return AccountClientError::RequestError(err),
        };
        Self::from_status(status, &text)
    }

    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|body| body.error)
            .unwrap_or_else(|_| body.trim().to_string());

        match status {
            StatusCode::FORBIDDEN | StatusCode::CONFLICT => AccountClientError::Conflict(message),
            StatusCode::UNAUTHORIZED => AccountClientError::InvalidCredentials(message),
            StatusCode::BAD_REQUEST => AccountClientError::InvalidRequest(message),
            other => AccountClientError::Server {
                status: other.as_u16(),
                message,
            },
        }
    }
}
