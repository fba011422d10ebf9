//! Personal-finance tracking API.
//!
//! Register / log in to obtain a bearer token, then record transactions,
//! keep a monthly budget and read summaries. Every finance route sits
//! behind the access gate in [`middleware::auth::access`].

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
