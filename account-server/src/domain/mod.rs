pub mod account;
pub mod error;
