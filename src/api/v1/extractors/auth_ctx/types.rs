/*
 * Responsibility
 * - the "authenticated context" type handlers see
 * - the access gate verifies the token and stores this in request extensions
 */
use crate::services::auth::{SubjectId, VerifiedAccessToken};

/// Attached to every request that passed the access gate.
///
/// Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub subject: SubjectId,
    pub issued_at: Option<i64>,
    pub expires_at: Option<i64>,
}

impl From<VerifiedAccessToken> for AuthCtx {
    fn from(v: VerifiedAccessToken) -> Self {
        Self {
            subject: v.subject,
            issued_at: v.issued_at,
            expires_at: v.expires_at,
        }
    }
}
