use serde::Serialize;

use crate::error::AppError;
use crate::services::auth::jwt::JwtIssuer;
use crate::services::auth::subject::SubjectId;

#[derive(Debug, Serialize)]
struct AccessTokenClaims<'a> {
    sub: &'a str,
    iat: i64,
    exp: i64,
}

/// What a client gets back from register/login.
#[derive(Clone, Debug)]
pub struct IssuedAccessToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub expires_at: i64,
}

#[derive(Clone, Debug)]
pub struct TokenIssuer {
    jwt: JwtIssuer,
}

impl TokenIssuer {
    pub fn new(jwt: JwtIssuer) -> Self {
        Self { jwt }
    }

    /// Issue an access token for `subject`, valid from now for the configured TTL.
    pub fn issue_access_token(&self, subject: &SubjectId) -> Result<IssuedAccessToken, AppError> {
        self.issue_access_token_at(subject, chrono::Utc::now().timestamp())
    }

    /// Same as [`Self::issue_access_token`] with an explicit issue time (unix seconds).
    pub fn issue_access_token_at(
        &self,
        subject: &SubjectId,
        now: i64,
    ) -> Result<IssuedAccessToken, AppError> {
        let ttl = self.jwt.ttl_seconds();
        let exp = now.saturating_add(i64::try_from(ttl).map_err(|_| AppError::Internal)?);

        let claims = AccessTokenClaims {
            sub: subject.as_str(),
            iat: now,
            exp,
        };

        Ok(IssuedAccessToken {
            access_token: self.jwt.sign(&claims)?,
            token_type: "Bearer",
            expires_in: ttl,
            expires_at: exp,
        })
    }
}
