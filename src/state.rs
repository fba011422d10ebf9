/*
 * Responsibility
 * - shared context attached to the Router (AppState)
 * - cheap to clone: everything inside is behind Arc
 */
use std::sync::Arc;

use crate::repos::{BudgetRepo, TransactionRepo};
use crate::services::{accounts::AccountService, auth::AuthService};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub accounts: Arc<AccountService>,
    pub transactions: Arc<dyn TransactionRepo>,
    pub budgets: Arc<dyn BudgetRepo>,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        accounts: Arc<AccountService>,
        transactions: Arc<dyn TransactionRepo>,
        budgets: Arc<dyn BudgetRepo>,
    ) -> Self {
        Self {
            auth,
            accounts,
            transactions,
            budgets,
        }
    }
}
