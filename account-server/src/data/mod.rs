pub mod account_repository;
pub mod memory_repository;
