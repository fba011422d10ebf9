/*
 * Responsibility
 * - what a repo reports upward (meaning, not backend detail)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    Conflict(&'static str),
}

pub type RepoResult<T> = Result<T, RepoError>;
