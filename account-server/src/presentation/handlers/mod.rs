use actix_web::web;

use crate::application::account_service::AccountService;
use crate::data::account_repository::AccountStore;

pub mod account;
pub mod health;

/// Account service as registered in app data, independent of the backing store.
pub type AccountServiceData = web::Data<AccountService<dyn AccountStore>>;
