#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use budget_tracker::{
    app,
    config::{Config, SigningSecret},
    services::auth::{SubjectId, TokenIssuer, jwt::JwtIssuer},
    state::AppState,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "test-signing-secret";

pub fn config_with_secret(secret: &str) -> Config {
    config_from(&[("JWT_SECRET", secret)])
}

/// Config from explicit key/value pairs; anything not listed is unset.
pub fn config_from(pairs: &[(&str, &str)]) -> Config {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(move |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test config")
}

pub fn app_with_config(config: &Config) -> Router {
    app::build_router(app::build_state(config), config)
}

pub fn state_with_secret(secret: &str) -> AppState {
    app::build_state(&config_with_secret(secret))
}

pub fn app_with_secret(secret: &str) -> Router {
    app_with_config(&config_with_secret(secret))
}

pub fn issue_token(secret: &str, subject: &str, now: i64, ttl_seconds: u64) -> String {
    let secret = SigningSecret::new(secret).unwrap();
    TokenIssuer::new(JwtIssuer::new(&secret, ttl_seconds))
        .issue_access_token_at(&SubjectId::new(subject).unwrap(), now)
        .unwrap()
        .access_token
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn request(
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Send one request and decode the JSON body (`Null` when empty).
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
