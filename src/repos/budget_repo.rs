use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::repos::error::RepoResult;
use crate::services::auth::SubjectId;

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRow {
    pub monthly_limit: f64,
    pub updated_at: DateTime<Utc>,
}

/// One monthly spending limit per owner.
#[async_trait]
pub trait BudgetRepo: Send + Sync {
    async fn get(&self, owner: &SubjectId) -> RepoResult<Option<BudgetRow>>;

    /// Insert or overwrite.
    async fn upsert(&self, owner: &SubjectId, monthly_limit: f64) -> RepoResult<BudgetRow>;
}

#[derive(Debug, Default)]
pub struct InMemoryBudgetRepo {
    rows: RwLock<HashMap<SubjectId, BudgetRow>>,
}

impl InMemoryBudgetRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BudgetRepo for InMemoryBudgetRepo {
    async fn get(&self, owner: &SubjectId) -> RepoResult<Option<BudgetRow>> {
        Ok(self.rows.read().await.get(owner).cloned())
    }

    async fn upsert(&self, owner: &SubjectId, monthly_limit: f64) -> RepoResult<BudgetRow> {
        let row = BudgetRow {
            monthly_limit,
            updated_at: Utc::now(),
        };
        self.rows.write().await.insert(owner.clone(), row.clone());
        Ok(row)
    }
}
