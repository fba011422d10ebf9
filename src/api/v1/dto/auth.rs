/*
 * Responsibility
 * - request/response DTOs for /auth/...
 * - validate() does shape checks only; uniqueness etc. belongs to the service
 */
use serde::{Deserialize, Serialize};

use crate::api::v1::extractors::Validate;
use crate::repos::AccountRow;
use crate::services::accounts::AuthenticatedAccount;
use crate::services::auth::SubjectId;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.name.len() > 100 {
            return Err("name must be <= 100 chars");
        }
        validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err("password must be at least 6 characters");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err("email and password are required");
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && email.len() <= 254 =>
        {
            Ok(())
        }
        _ => Err("email is invalid"),
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: SubjectId,
    pub name: String,
    pub email: String,
}

impl From<AccountRow> for UserResponse {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Always "Bearer"
    pub token_type: &'static str,
    /// Seconds until expiry.
    pub expires_in: u64,
    pub user: UserResponse,
}

impl From<AuthenticatedAccount> for AuthResponse {
    fn from(out: AuthenticatedAccount) -> Self {
        Self {
            token: out.token.access_token,
            token_type: out.token.token_type,
            expires_in: out.token.expires_in,
            user: out.account.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn register_validation() {
        assert!(register("Ada", "ada@example.com", "hunter22").validate().is_ok());
        assert_eq!(
            register(" ", "ada@example.com", "hunter22").validate(),
            Err("name is required")
        );
        assert_eq!(
            register("Ada", "ada.example.com", "hunter22").validate(),
            Err("email is invalid")
        );
        assert_eq!(
            register("Ada", "@example.com", "hunter22").validate(),
            Err("email is invalid")
        );
        assert_eq!(
            register("Ada", "ada@example.com", "12345").validate(),
            Err("password must be at least 6 characters")
        );
    }
}
