/*
 * Responsibility
 * - POST /auth/register, POST /auth/login (public; they mint tokens)
 * - GET /auth/me (behind the access gate)
 */
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};

use crate::api::v1::dto::auth::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::api::v1::extractors::{AuthCtxExtractor, extract_validated_json};
use crate::error::AppError;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let req = extract_validated_json(body)?;

    let out = state
        .accounts
        .register(&req.name, &req.email, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(out.into())))
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let req = extract_validated_json(body)?;

    let out = state.accounts.login(&req.email, &req.password).await?;

    Ok(Json(out.into()))
}

pub async fn me(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<UserResponse>, AppError> {
    let account = state
        .accounts
        .get(&ctx.subject)
        .await?
        .ok_or(AppError::not_found("account"))?;

    Ok(Json(account.into()))
}
