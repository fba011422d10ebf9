/*
 * Responsibility
 * - account records (registration / login lookup)
 * - emails are unique; callers pass them already normalised
 */
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::services::auth::SubjectId;

#[derive(Debug, Clone)]
pub struct AccountRow {
    pub id: SubjectId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[async_trait]
pub trait AccountRepo: Send + Sync {
    /// Fails with `Conflict` when the email is taken.
    async fn create(&self, new: NewAccount) -> RepoResult<AccountRow>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<AccountRow>>;

    async fn get(&self, id: &SubjectId) -> RepoResult<Option<AccountRow>>;
}

/// Process-local account store.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepo {
    rows: RwLock<HashMap<SubjectId, AccountRow>>,
}

impl InMemoryAccountRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepo for InMemoryAccountRepo {
    async fn create(&self, new: NewAccount) -> RepoResult<AccountRow> {
        let mut rows = self.rows.write().await;

        if rows.values().any(|row| row.email == new.email) {
            return Err(RepoError::Conflict("User already exists"));
        }

        let id = SubjectId::from_uuid(Uuid::new_v4());
        let row = AccountRow {
            id: id.clone(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        };
        rows.insert(id, row.clone());

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<AccountRow>> {
        let rows = self.rows.read().await;
        Ok(rows.values().find(|row| row.email == email).cloned())
    }

    async fn get(&self, id: &SubjectId) -> RepoResult<Option<AccountRow>> {
        Ok(self.rows.read().await.get(id).cloned())
    }
}
