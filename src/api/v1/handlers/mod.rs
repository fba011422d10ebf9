pub mod auth;
pub mod budget;
pub mod health;
pub mod summary;
pub mod transactions;
