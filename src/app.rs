/*
 * Responsibility
 * - load Config → build dependencies → assemble the Router
 * - apply middleware (security headers, CORS, request id / trace / limits)
 * - start axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::middleware;
use crate::repos::{InMemoryAccountRepo, InMemoryBudgetRepo, InMemoryTransactionRepo};
use crate::services::accounts::AccountService;
use crate::services::auth::{build_auth_service, build_token_issuer};
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,budget_tracker=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr may be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        // Development: crash so it gets noticed. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "refusing to start");
    })?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wire process-level services. The signing secret is handed to the
/// verifier and the issuer here, once.
pub fn build_state(config: &Config) -> AppState {
    let auth = build_auth_service(config);
    let issuer = build_token_issuer(config);

    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryAccountRepo::new()),
        issuer,
    ));

    AppState::new(
        auth,
        accounts,
        Arc::new(InMemoryTransactionRepo::new()),
        Arc::new(InMemoryBudgetRepo::new()),
    )
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
