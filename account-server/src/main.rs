mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use application::account_service::AccountService;
use data::account_repository::{AccountStore, PostgresAccountStore};
use data::memory_repository::InMemoryAccountStore;
use infrastructure::config::{AppConfig, StoreKind};
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::security::Sha512PasswordHasher;
use presentation::handlers;
use presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let store = build_store(&config).await?;
    let account_service = web::Data::new(AccountService::new(
        store,
        Arc::new(Sha512PasswordHasher),
    ));

    let config_data = config.clone();
    info!(host = %config.host, port = config.port, store = ?config.store, "starting account server");

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(Logger::default())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(cors)
            .app_data(account_service.clone())
            .service(handlers::health::health)
            .service(handlers::account::scope())
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}

async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn AccountStore>> {
    match config.store {
        StoreKind::Memory => {
            warn!("using in-memory account store; accounts are lost on shutdown");
            Ok(Arc::new(InMemoryAccountStore::new()))
        }
        StoreKind::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when STORE=postgres")?;
            let pool = create_pool(database_url, config.db_max_connections)
                .await
                .context("failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("failed to run migrations")?;
            Ok(Arc::new(PostgresAccountStore::new(pool)))
        }
    }
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT"])
        .allowed_headers(vec![header::CONTENT_TYPE, HeaderName::from_static("password")])
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        };
    }

    cors
}
