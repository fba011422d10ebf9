/*
 * Responsibility
 * - /transactions CRUD, always scoped to the caller's subject
 * - someone else's transaction id answers 404, same as an unknown one
 */
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;

use crate::api::v1::dto::transactions::{
    CreateTransactionRequest, TransactionListQuery, TransactionListResponse, TransactionResponse,
    UpdateTransactionRequest,
};
use crate::api::v1::extractors::{
    AuthCtxExtractor, Validate, extract_path, extract_query, extract_validated_json,
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_transactions(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    query: Result<Query<TransactionListQuery>, QueryRejection>,
) -> Result<Json<TransactionListResponse>, AppError> {
    let query = extract_query(query)?;
    query.validate().map_err(AppError::invalid_request)?;

    let rows = state
        .transactions
        .list(&ctx.subject, &query.into_filter())
        .await?;

    Ok(Json(TransactionListResponse {
        msg: format!("Here are your transactions for user {}", ctx.subject),
        transactions: rows.into_iter().map(TransactionResponse::from).collect(),
    }))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    body: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionResponse>), AppError> {
    let req: CreateTransactionRequest = extract_validated_json(body)?;

    let row = state
        .transactions
        .create(&ctx.subject, req.into_new())
        .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    transaction_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateTransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let transaction_id = extract_path(transaction_id)?;
    let req: UpdateTransactionRequest = extract_validated_json(body)?;

    let row = state
        .transactions
        .update(&ctx.subject, transaction_id, req.into_patch())
        .await?
        .ok_or(AppError::not_found("transaction"))?;

    Ok(Json(row.into()))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    transaction_id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let transaction_id = extract_path(transaction_id)?;

    let deleted = state
        .transactions
        .delete(&ctx.subject, transaction_id)
        .await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("transaction"))
    }
}
