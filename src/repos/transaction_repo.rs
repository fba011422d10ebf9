/*
 * Responsibility
 * - income/expense records, always scoped by owner
 * - another owner's record behaves exactly like a missing one
 */
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::services::auth::SubjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: Uuid,
    pub owner: SubjectId,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub kind: TransactionKind,
}

// None: leave the field as is
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub kind: Option<TransactionKind>,
}

/// Narrows a listing. Empty filter: everything the owner has.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive on both ends.
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(&self, row: &TransactionRow) -> bool {
        self.category.as_deref().is_none_or(|c| row.category == c)
            && self.from.is_none_or(|from| row.date >= from)
            && self.to.is_none_or(|to| row.date <= to)
    }
}

#[async_trait]
pub trait TransactionRepo: Send + Sync {
    /// Newest date first; ties broken by creation time, newest first.
    async fn list(
        &self,
        owner: &SubjectId,
        filter: &TransactionFilter,
    ) -> RepoResult<Vec<TransactionRow>>;

    async fn create(&self, owner: &SubjectId, new: NewTransaction) -> RepoResult<TransactionRow>;

    /// `Ok(None)` when `id` does not exist for this owner.
    async fn update(
        &self,
        owner: &SubjectId,
        id: Uuid,
        patch: TransactionPatch,
    ) -> RepoResult<Option<TransactionRow>>;

    /// `Ok(false)` when `id` does not exist for this owner.
    async fn delete(&self, owner: &SubjectId, id: Uuid) -> RepoResult<bool>;
}

#[derive(Debug, Default)]
pub struct InMemoryTransactionRepo {
    by_owner: RwLock<HashMap<SubjectId, Vec<TransactionRow>>>,
}

impl InMemoryTransactionRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepo for InMemoryTransactionRepo {
    async fn list(
        &self,
        owner: &SubjectId,
        filter: &TransactionFilter,
    ) -> RepoResult<Vec<TransactionRow>> {
        let mut rows: Vec<TransactionRow> = self
            .by_owner
            .read()
            .await
            .get(owner)
            .map(|rows| {
                rows.iter()
                    .filter(|row| filter.matches(row))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        rows.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        Ok(rows)
    }

    async fn create(&self, owner: &SubjectId, new: NewTransaction) -> RepoResult<TransactionRow> {
        let row = TransactionRow {
            id: Uuid::new_v4(),
            owner: owner.clone(),
            date: new.date,
            description: new.description,
            category: new.category,
            amount: new.amount,
            kind: new.kind,
            created_at: Utc::now(),
        };

        self.by_owner
            .write()
            .await
            .entry(owner.clone())
            .or_default()
            .push(row.clone());

        Ok(row)
    }

    async fn update(
        &self,
        owner: &SubjectId,
        id: Uuid,
        patch: TransactionPatch,
    ) -> RepoResult<Option<TransactionRow>> {
        let mut by_owner = self.by_owner.write().await;

        let Some(row) = by_owner
            .get_mut(owner)
            .and_then(|rows| rows.iter_mut().find(|row| row.id == id))
        else {
            return Ok(None);
        };

        if let Some(date) = patch.date {
            row.date = date;
        }
        if let Some(description) = patch.description {
            row.description = description;
        }
        if let Some(category) = patch.category {
            row.category = category;
        }
        if let Some(amount) = patch.amount {
            row.amount = amount;
        }
        if let Some(kind) = patch.kind {
            row.kind = kind;
        }

        Ok(Some(row.clone()))
    }

    async fn delete(&self, owner: &SubjectId, id: Uuid) -> RepoResult<bool> {
        let mut by_owner = self.by_owner.write().await;

        let Some(rows) = by_owner.get_mut(owner) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|row| row.id != id);

        Ok(rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(raw: &str) -> SubjectId {
        SubjectId::new(raw).unwrap()
    }

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn new_tx(date_raw: &str, amount: f64, kind: TransactionKind) -> NewTransaction {
        NewTransaction {
            date: date(date_raw),
            description: "Grocery shopping".to_string(),
            category: "Food".to_string(),
            amount,
            kind,
        }
    }

    fn in_category(mut tx: NewTransaction, category: &str) -> NewTransaction {
        tx.category = category.to_string();
        tx
    }

    #[tokio::test]
    async fn list_is_newest_first_and_scoped() {
        let repo = InMemoryTransactionRepo::new();
        let alice = owner("alice");
        let bob = owner("bob");

        repo.create(&alice, new_tx("2023-06-01", 85.5, TransactionKind::Expense))
            .await
            .unwrap();
        repo.create(&alice, new_tx("2023-06-05", 2500.0, TransactionKind::Income))
            .await
            .unwrap();
        repo.create(&bob, new_tx("2023-06-03", 10.0, TransactionKind::Expense))
            .await
            .unwrap();

        let rows = repo.list(&alice, &TransactionFilter::default()).await.unwrap();
        let dates: Vec<String> = rows.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2023-06-05", "2023-06-01"]);
        assert!(rows.iter().all(|r| r.owner == alice));

        assert!(
            repo.list(&owner("carol"), &TransactionFilter::default())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn update_applies_only_given_fields() {
        let repo = InMemoryTransactionRepo::new();
        let alice = owner("alice");
        let row = repo
            .create(&alice, new_tx("2023-06-01", 85.5, TransactionKind::Expense))
            .await
            .unwrap();

        let patch = TransactionPatch {
            amount: Some(90.0),
            category: Some("Groceries".to_string()),
            ..Default::default()
        };
        let updated = repo.update(&alice, row.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.amount, 90.0);
        assert_eq!(updated.category, "Groceries");
        assert_eq!(updated.description, row.description);
        assert_eq!(updated.date, row.date);
    }

    #[tokio::test]
    async fn other_owner_cannot_touch_record() {
        let repo = InMemoryTransactionRepo::new();
        let alice = owner("alice");
        let mallory = owner("mallory");
        let row = repo
            .create(&alice, new_tx("2023-06-01", 85.5, TransactionKind::Expense))
            .await
            .unwrap();

        let patch = TransactionPatch {
            amount: Some(1.0),
            ..Default::default()
        };
        assert!(repo.update(&mallory, row.id, patch).await.unwrap().is_none());
        assert!(!repo.delete(&mallory, row.id).await.unwrap());

        assert!(repo.delete(&alice, row.id).await.unwrap());
        assert!(!repo.delete(&alice, row.id).await.unwrap());
    }

    #[tokio::test]
    async fn list_filters_by_category_and_inclusive_date_range() {
        let repo = InMemoryTransactionRepo::new();
        let alice = owner("alice");

        for (d, category) in [
            ("2023-05-31", "Food"),
            ("2023-06-01", "Food"),
            ("2023-06-15", "Rent"),
            ("2023-06-30", "Food"),
            ("2023-07-01", "Food"),
        ] {
            repo.create(
                &alice,
                in_category(new_tx(d, 10.0, TransactionKind::Expense), category),
            )
            .await
            .unwrap();
        }

        let june = TransactionFilter {
            from: Some(date("2023-06-01")),
            to: Some(date("2023-06-30")),
            ..Default::default()
        };
        let dates: Vec<String> = repo
            .list(&alice, &june)
            .await
            .unwrap()
            .iter()
            .map(|r| r.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2023-06-30", "2023-06-15", "2023-06-01"]);

        let june_food = TransactionFilter {
            category: Some("Food".to_string()),
            ..june
        };
        let rows = repo.list(&alice, &june_food).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.category == "Food"));

        let open_start = TransactionFilter {
            to: Some(date("2023-05-31")),
            ..Default::default()
        };
        assert_eq!(repo.list(&alice, &open_start).await.unwrap().len(), 1);
    }
}
