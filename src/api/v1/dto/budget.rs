use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::v1::extractors::Validate;
use crate::repos::BudgetRow;

#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    pub monthly_limit: f64,
}

impl Validate for BudgetRequest {
    fn validate(&self) -> Result<(), &'static str> {
        if !self.monthly_limit.is_finite() || self.monthly_limit < 0.0 {
            return Err("monthly_limit must be a non-negative number");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    pub monthly_limit: f64,
    pub updated_at: DateTime<Utc>,
}

impl From<BudgetRow> for BudgetResponse {
    fn from(row: BudgetRow) -> Self {
        Self {
            monthly_limit: row.monthly_limit,
            updated_at: row.updated_at,
        }
    }
}
