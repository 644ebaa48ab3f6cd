use actix_web::dev::Payload;
use actix_web::http::header::HeaderName;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::error::DomainError;
use crate::presentation::middleware::RequestId;

pub static PASSWORD_HEADER: HeaderName = HeaderName::from_static("password");

static EMAIL_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)*$").ok());

/// Basic email format check. Dotless domains such as `localhost` pass.
pub fn valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(email.trim()))
}

pub fn ensure_valid_email(email: &str) -> Result<(), DomainError> {
    if valid_email(email) {
        Ok(())
    } else {
        Err(DomainError::InvalidInput(format!(
            "email is not a valid address: {email}"
        )))
    }
}

/// Plaintext password taken from the `password` request header.
#[derive(Clone)]
pub struct PasswordHeader(pub String);

impl FromRequest for PasswordHeader {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.headers().get(&PASSWORD_HEADER) {
            // Raw bytes, not `to_str()`: passwords may be any UTF-8.
            Some(value) => std::str::from_utf8(value.as_bytes())
                .map(|password| PasswordHeader(password.to_owned()))
                .map_err(|_| DomainError::InvalidInput("password header is not valid UTF-8".into())),
            None => Err(DomainError::InvalidInput("missing password header".into())),
        };
        ready(result)
    }
}

pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
