use std::collections::HashSet;
use std::{error::Error as StdError, fmt};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::config::SigningSecret;
use crate::services::auth::subject::SubjectId;

// Why a presented token was refused. Only logged; clients just see "invalid token".
#[derive(Debug)]
pub enum AccessJwtError {
    Empty,
    Malformed(jsonwebtoken::errors::Error),
    BadSignature,
    Expired { exp: i64, now: i64 },
    MissingSubject,
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty token"),
            Self::Malformed(e) => write!(f, "malformed token: {}", e),
            Self::BadSignature => write!(f, "signature mismatch"),
            Self::Expired { exp, now } => write!(f, "token expired at {} (now {})", exp, now),
            Self::MissingSubject => write!(f, "missing or empty 'sub' claim"),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Malformed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => Self::BadSignature,
            _ => Self::Malformed(e),
        }
    }
}

/// Access token claims as presented by clients.
///
/// The subject comes from `userId` when it is set, otherwise from `sub`.
/// `exp` is optional but enforced when present.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl AccessTokenClaims {
    fn into_subject(self) -> Option<SubjectId> {
        self.user_id
            .and_then(SubjectId::new)
            .or_else(|| self.sub.and_then(SubjectId::new))
    }
}

/// Verified token, reduced to what handlers may rely on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccessToken {
    pub subject: SubjectId,
    pub issued_at: Option<i64>,
    pub expires_at: Option<i64>,
}

/// HS256 access-token verifier.
///
/// Holds only immutable key material, so one instance is shared by every
/// request. Key material is not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
    leeway_seconds: i64,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("algorithms", &self.validation.algorithms)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(secret: &SigningSecret, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at` against the caller's clock.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            leeway_seconds: i64::try_from(leeway_seconds).unwrap_or(i64::MAX),
        }
    }

    /// Verify against the wall clock.
    pub fn verify(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// Verify signature, expiry and subject as of `now` (unix seconds).
    ///
    /// A token is expired once `now >= exp + leeway`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<VerifiedAccessToken, AccessJwtError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AccessJwtError::Empty);
        }

        let claims =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?
                .claims;

        if let Some(exp) = claims.exp
            && now >= exp.saturating_add(self.leeway_seconds)
        {
            return Err(AccessJwtError::Expired { exp, now });
        }

        let (issued_at, expires_at) = (claims.iat, claims.exp);
        let subject = claims
            .into_subject()
            .ok_or(AccessJwtError::MissingSubject)?;

        Ok(VerifiedAccessToken {
            subject,
            issued_at,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;
    use crate::services::auth::jwt::JwtIssuer;
    use crate::services::auth::token_issuer::TokenIssuer;

    const NOW: i64 = 1_700_000_000;

    fn secret(raw: &str) -> SigningSecret {
        SigningSecret::new(raw).unwrap()
    }

    fn subject(raw: &str) -> SubjectId {
        SubjectId::new(raw).unwrap()
    }

    fn issue(secret_raw: &str, sub: &str, now: i64, ttl: u64) -> String {
        TokenIssuer::new(JwtIssuer::new(&secret(secret_raw), ttl))
            .issue_access_token_at(&subject(sub), now)
            .unwrap()
            .access_token
    }

    fn sign_raw(secret_raw: &str, alg: Algorithm, payload: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::new(alg),
            &payload,
            &EncodingKey::from_secret(secret_raw.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_yields_its_subject() {
        let token = issue("S", "user123", NOW, 3600);
        let verifier = AuthService::new(&secret("S"), 0);

        let verified = verifier.verify_at(&token, NOW + 10).unwrap();

        assert_eq!(verified.subject.as_str(), "user123");
        assert_eq!(verified.issued_at, Some(NOW));
        assert_eq!(verified.expires_at, Some(NOW + 3600));
    }

    #[test]
    fn rotated_secret_rejects_old_tokens() {
        let token = issue("S", "user123", NOW, 3600);

        let under_s = AuthService::new(&secret("S"), 0).verify_at(&token, NOW);
        assert_eq!(under_s.unwrap().subject.as_str(), "user123");

        let under_s_prime = AuthService::new(&secret("S'"), 0).verify_at(&token, NOW);
        assert!(matches!(under_s_prime, Err(AccessJwtError::BadSignature)));
    }

    #[test]
    fn verification_is_repeatable() {
        let token = issue("S", "user123", NOW, 3600);
        let verifier = AuthService::new(&secret("S"), 0);

        let first = verifier.verify_at(&token, NOW).unwrap();
        let second = verifier.verify_at(&token, NOW).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue("S", "user123", NOW - 7200, 3600);
        let verifier = AuthService::new(&secret("S"), 0);

        match verifier.verify_at(&token, NOW) {
            Err(AccessJwtError::Expired { exp, now }) => {
                assert_eq!(exp, NOW - 3600);
                assert_eq!(now, NOW);
            }
            other => panic!("expected Expired, got {other:?}"),
        }
    }

    #[test]
    fn expiry_boundary_and_leeway() {
        let token = issue("S", "user123", NOW, 60);

        let strict = AuthService::new(&secret("S"), 0);
        assert!(strict.verify_at(&token, NOW + 59).is_ok());
        assert!(matches!(
            strict.verify_at(&token, NOW + 60),
            Err(AccessJwtError::Expired { .. })
        ));

        let tolerant = AuthService::new(&secret("S"), 30);
        assert!(tolerant.verify_at(&token, NOW + 89).is_ok());
        assert!(tolerant.verify_at(&token, NOW + 90).is_err());
    }

    #[test]
    fn wall_clock_verification_accepts_fresh_token() {
        let now = chrono::Utc::now().timestamp();
        let token = issue("S", "user123", now, 600);

        let verified = AuthService::new(&secret("S"), 0).verify(&token).unwrap();
        assert_eq!(verified.subject.as_str(), "user123");
    }

    #[test]
    fn empty_and_garbage_tokens_are_rejected() {
        let verifier = AuthService::new(&secret("S"), 0);

        assert!(matches!(verifier.verify_at("", NOW), Err(AccessJwtError::Empty)));
        assert!(matches!(verifier.verify_at("   ", NOW), Err(AccessJwtError::Empty)));
        assert!(matches!(
            verifier.verify_at("not-a-jwt", NOW),
            Err(AccessJwtError::Malformed(_))
        ));
        assert!(matches!(
            verifier.verify_at("a.b.c", NOW),
            Err(AccessJwtError::Malformed(_))
        ));
    }

    #[test]
    fn other_algorithms_are_refused() {
        let token = sign_raw("S", Algorithm::HS512, json!({ "sub": "user123" }));
        let verifier = AuthService::new(&secret("S"), 0);

        assert!(matches!(
            verifier.verify_at(&token, NOW),
            Err(AccessJwtError::Malformed(_))
        ));
    }

    #[test]
    fn user_id_claim_is_accepted_as_subject() {
        let token = sign_raw(
            "S",
            Algorithm::HS256,
            json!({ "userId": "64b7f0c2a1", "iat": NOW, "exp": NOW + 3600 }),
        );

        let verified = AuthService::new(&secret("S"), 0)
            .verify_at(&token, NOW)
            .unwrap();
        assert_eq!(verified.subject.as_str(), "64b7f0c2a1");
    }

    #[test]
    fn user_id_wins_when_both_subject_claims_are_present() {
        let verifier = AuthService::new(&secret("S"), 0);

        let both = sign_raw(
            "S",
            Algorithm::HS256,
            json!({ "sub": "from-sub", "userId": "from-user-id", "exp": NOW + 60 }),
        );
        assert_eq!(
            verifier.verify_at(&both, NOW).unwrap().subject.as_str(),
            "from-user-id"
        );

        let blank_user_id = sign_raw(
            "S",
            Algorithm::HS256,
            json!({ "sub": "from-sub", "userId": "", "exp": NOW + 60 }),
        );
        assert_eq!(
            verifier.verify_at(&blank_user_id, NOW).unwrap().subject.as_str(),
            "from-sub"
        );
    }

    #[test]
    fn token_without_expiry_is_accepted() {
        let token = sign_raw("S", Algorithm::HS256, json!({ "sub": "user123" }));

        let verified = AuthService::new(&secret("S"), 0)
            .verify_at(&token, NOW)
            .unwrap();
        assert_eq!(verified.expires_at, None);
    }

    #[test]
    fn missing_or_blank_subject_is_rejected() {
        let verifier = AuthService::new(&secret("S"), 0);

        let no_sub = sign_raw("S", Algorithm::HS256, json!({ "exp": NOW + 60 }));
        assert!(matches!(
            verifier.verify_at(&no_sub, NOW),
            Err(AccessJwtError::MissingSubject)
        ));

        let blank_sub = sign_raw("S", Algorithm::HS256, json!({ "sub": " ", "exp": NOW + 60 }));
        assert!(matches!(
            verifier.verify_at(&blank_sub, NOW),
            Err(AccessJwtError::MissingSubject)
        ));
    }

    #[test]
    fn debug_does_not_leak_key_material() {
        let verifier = AuthService::new(&secret("very-secret-value"), 0);
        assert!(!format!("{verifier:?}").contains("very-secret-value"));
    }
}
