pub mod account_repo;
pub mod budget_repo;
pub mod error;
pub mod transaction_repo;

pub use account_repo::{AccountRepo, AccountRow, InMemoryAccountRepo, NewAccount};
pub use budget_repo::{BudgetRepo, BudgetRow, InMemoryBudgetRepo};
pub use error::{RepoError, RepoResult};
pub use transaction_repo::{
    InMemoryTransactionRepo, NewTransaction, TransactionFilter, TransactionKind, TransactionPatch,
    TransactionRepo, TransactionRow,
};
