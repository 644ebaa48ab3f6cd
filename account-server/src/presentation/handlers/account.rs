use actix_web::error::QueryPayloadError;
use actix_web::{HttpRequest, HttpResponse, Scope, get, post, put, web};
use tracing::info;

use crate::domain::error::DomainError;
use crate::presentation::dto::{
    AccountResponse, CreateAccountQuery, GetAccountQuery, UpdateAccountQuery,
};
use crate::presentation::handlers::AccountServiceData;
use crate::presentation::utils::{PasswordHeader, ensure_valid_email, request_id};

pub fn scope() -> Scope {
    web::scope("/account")
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(create_account)
        .service(get_account)
        .service(update_account)
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    DomainError::InvalidInput(err.to_string()).into()
}

#[post("/")]
async fn create_account(
    req: HttpRequest,
    service: AccountServiceData,
    query: web::Query<CreateAccountQuery>,
) -> Result<HttpResponse, DomainError> {
    let query = query.into_inner();
    ensure_valid_email(&query.email)?;

    let account = service
        .create(&query.email, &query.password, query.first_name, query.last_name)
        .await?;

    info!(
        request_id = %request_id(&req),
        email = %account.email,
        "account created"
    );

    Ok(HttpResponse::Created().json(AccountResponse::from(account)))
}

#[get("/")]
async fn get_account(
    req: HttpRequest,
    service: AccountServiceData,
    query: web::Query<GetAccountQuery>,
    password: PasswordHeader,
) -> Result<HttpResponse, DomainError> {
    ensure_valid_email(&query.email)?;

    let account = service.get(&query.email, &password.0).await?;

    info!(
        request_id = %request_id(&req),
        email = %account.email,
        "account retrieved"
    );

    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}

#[put("/")]
async fn update_account(
    req: HttpRequest,
    service: AccountServiceData,
    query: web::Query<UpdateAccountQuery>,
    password: PasswordHeader,
) -> Result<HttpResponse, DomainError> {
    let query = query.into_inner();
    ensure_valid_email(&query.email)?;

    let account = service
        .update(&query.email, &password.0, query.first_name, query.last_name)
        .await?;

    info!(
        request_id = %request_id(&req),
        email = %account.email,
        "account updated"
    );

    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}
