//! CORS for the budget dashboard front-end.
//!
//! - Development: any origin.
//! - Production: exact-match allow-list from `CORS_ALLOWED_ORIGINS`. An empty
//!   or fully unparseable list allows no origin, and that is logged at startup.
//!
//! Tokens travel in `Authorization`, never in cookies, so credentials mode
//! stays off. `x-request-id` is exposed so the front-end can quote it in
//! bug reports.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::middleware::http::REQUEST_ID_HEADER;

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(10 * 60);

pub fn apply(router: Router, config: &Config) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(config))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id.clone(),
        ])
        .expose_headers([request_id])
        .max_age(PREFLIGHT_MAX_AGE);

    router.layer(cors)
}

fn allowed_origins(config: &Config) -> AllowOrigin {
    if !config.app_env.is_production() {
        return AllowOrigin::from(Any);
    }

    let allowed: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS is empty; browsers on other origins are refused");
    }

    AllowOrigin::predicate(move |origin: &HeaderValue, _req| allowed.iter().any(|v| v == origin))
}
