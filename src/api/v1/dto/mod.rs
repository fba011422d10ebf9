pub mod auth;
pub mod budget;
pub mod transactions;
