use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::api::v1::dto::budget::{BudgetRequest, BudgetResponse};
use crate::api::v1::extractors::{AuthCtxExtractor, extract_validated_json};
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_budget(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<BudgetResponse>, AppError> {
    let row = state
        .budgets
        .get(&ctx.subject)
        .await?
        .ok_or(AppError::not_found("budget"))?;

    Ok(Json(row.into()))
}

pub async fn put_budget(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    body: Result<Json<BudgetRequest>, JsonRejection>,
) -> Result<Json<BudgetResponse>, AppError> {
    let req: BudgetRequest = extract_validated_json(body)?;

    let row = state
        .budgets
        .upsert(&ctx.subject, req.monthly_limit)
        .await?;

    Ok(Json(row.into()))
}
