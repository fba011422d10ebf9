use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::AppError;
use crate::repos::{AccountRepo, AccountRow, NewAccount};
use crate::services::auth::password;
use crate::services::auth::{IssuedAccessToken, SubjectId, TokenIssuer};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// A freshly authenticated account together with its access token.
#[derive(Clone, Debug)]
pub struct AuthenticatedAccount {
    pub account: AccountRow,
    pub token: IssuedAccessToken,
}

/// Registration and login on top of an [`AccountRepo`].
#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn AccountRepo>,
    issuer: Arc<TokenIssuer>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl AccountService {
    pub fn new(repo: Arc<dyn AccountRepo>, issuer: Arc<TokenIssuer>) -> Self {
        Self { repo, issuer }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedAccount, AppError> {
        let email = normalize_email(email);
        let password_hash = hash_blocking(password.to_string()).await?;

        let account = self
            .repo
            .create(NewAccount {
                name: name.trim().to_string(),
                email,
                password_hash,
            })
            .await?;

        info!(account_id = %account.id, "account registered");

        let token = self.issuer.issue_access_token(&account.id)?;
        Ok(AuthenticatedAccount { account, token })
    }

    /// Unknown email and wrong password produce the same error.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedAccount, AppError> {
        let email = normalize_email(email);

        let Some(account) = self.repo.find_by_email(&email).await? else {
            debug!("login for unknown email");
            return Err(AppError::invalid_request(INVALID_CREDENTIALS));
        };

        let matches = verify_blocking(password.to_string(), account.password_hash.clone()).await?;
        if !matches {
            debug!(account_id = %account.id, "login with wrong password");
            return Err(AppError::invalid_request(INVALID_CREDENTIALS));
        }

        let token = self.issuer.issue_access_token(&account.id)?;
        Ok(AuthenticatedAccount { account, token })
    }

    pub async fn get(&self, id: &SubjectId) -> Result<Option<AccountRow>, AppError> {
        Ok(self.repo.get(id).await?)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

async fn hash_blocking(password: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| {
            error!(error = %e, "password hashing task failed");
            AppError::Internal
        })?;
    Ok(hashed?)
}

async fn verify_blocking(password: String, hash: String) -> Result<bool, AppError> {
    let verified = tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
        .await
        .map_err(|e| {
            error!(error = %e, "password verification task failed");
            AppError::Internal
        })?;
    Ok(verified?)
}
