/*
 * Responsibility
 * - request/response DTOs for /transactions
 * - amounts are always positive; direction comes from `type`
 * - list filters: ?category=&from=&to= (dates inclusive)
 */
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::v1::extractors::Validate;
use crate::repos::{
    NewTransaction, TransactionFilter, TransactionKind, TransactionPatch, TransactionRow,
};

const MAX_DESCRIPTION_LEN: usize = 256;
const MAX_CATEGORY_LEN: usize = 64;

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Defaults to today (UTC).
    pub date: Option<NaiveDate>,
    pub description: String,
    pub category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Validate for CreateTransactionRequest {
    fn validate(&self) -> Result<(), &'static str> {
        validate_description(&self.description)?;
        validate_category(&self.category)?;
        validate_amount(self.amount)
    }
}

impl CreateTransactionRequest {
    pub fn into_new(self) -> NewTransaction {
        NewTransaction {
            date: self.date.unwrap_or_else(|| Utc::now().date_naive()),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            amount: self.amount,
            kind: self.kind,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
}

impl Validate for UpdateTransactionRequest {
    fn validate(&self) -> Result<(), &'static str> {
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(category) = &self.category {
            validate_category(category)?;
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        Ok(())
    }
}

impl UpdateTransactionRequest {
    pub fn into_patch(self) -> TransactionPatch {
        TransactionPatch {
            date: self.date,
            description: self.description.map(|s| s.trim().to_string()),
            category: self.category.map(|s| s.trim().to_string()),
            amount: self.amount,
            kind: self.kind,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionListQuery {
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Validate for TransactionListQuery {
    fn validate(&self) -> Result<(), &'static str> {
        if let (Some(from), Some(to)) = (self.from, self.to)
            && from > to
        {
            return Err("from must not be after to");
        }
        Ok(())
    }
}

impl TransactionListQuery {
    /// A blank category means no category filter.
    pub fn into_filter(self) -> TransactionFilter {
        TransactionFilter {
            category: self
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            from: self.from,
            to: self.to,
        }
    }
}

fn validate_description(description: &str) -> Result<(), &'static str> {
    let description = description.trim();
    if description.is_empty() {
        return Err("description is required");
    }
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err("description must be <= 256 chars");
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), &'static str> {
    let category = category.trim();
    if category.is_empty() {
        return Err("category is required");
    }
    if category.len() > MAX_CATEGORY_LEN {
        return Err("category must be <= 64 chars");
    }
    Ok(())
}

fn validate_amount(amount: f64) -> Result<(), &'static str> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err("amount must be a positive number");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl From<TransactionRow> for TransactionResponse {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            description: row.description,
            category: row.category,
            amount: row.amount,
            kind: row.kind,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionListResponse {
    pub msg: String,
    pub transactions: Vec<TransactionResponse>,
}
