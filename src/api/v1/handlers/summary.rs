use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::api::v1::extractors::{AuthCtxExtractor, extract_query};
use crate::error::AppError;
use crate::repos::TransactionFilter;
use crate::services::summary::{self, Month, Summary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// `YYYY-MM`; omitted means all time.
    pub month: Option<String>,
}

pub async fn get_summary(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<Summary>, AppError> {
    let month = extract_query(query)?
        .month
        .as_deref()
        .map(str::parse::<Month>)
        .transpose()
        .map_err(|e| AppError::invalid_request(e.to_string()))?;

    let rows = state
        .transactions
        .list(&ctx.subject, &TransactionFilter::default())
        .await?;
    let budget = state.budgets.get(&ctx.subject).await?;

    Ok(Json(summary::summarize(
        &rows,
        budget.map(|b| b.monthly_limit),
        month,
    )))
}
