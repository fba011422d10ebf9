//! Factories: build the verifier and the issuer from application `Config`.
//!
//! Both receive the same secret here; nothing reads `JWT_SECRET` after startup.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthService, TokenIssuer, jwt::JwtIssuer};

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    Arc::new(AuthService::new(
        &config.jwt_secret,
        config.jwt_leeway_seconds,
    ))
}

pub fn build_token_issuer(config: &Config) -> Arc<TokenIssuer> {
    let jwt = JwtIssuer::new(&config.jwt_secret, config.jwt_ttl_seconds);
    Arc::new(TokenIssuer::new(jwt))
}
