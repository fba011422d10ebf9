//! Access gate: bearer token → verifier → `AuthCtx` in request extensions.
//!
//! - No usable token: 401 "No token, authorization denied"; the verifier is not called.
//! - Token present but rejected for any reason: 401 "Token is not valid".
//! - Otherwise the subject is attached for the downstream handler.
//!
//! The gate keeps no state between requests.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

const BEARER: &str = "bearer";

/// Put every route of `router` behind the access gate.
///
/// ```ignore
/// let protected = Router::new().route("/transactions", get(list_transactions));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: unknown paths still 404 instead of 401
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_from_headers(req.headers()).ok_or(AppError::MissingCredential)?;

    let verified = match state.auth.verify(token) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(AppError::InvalidCredential);
        }
    };

    tracing::debug!(subject = %verified.subject, "access token accepted");

    // middleware → extractor
    req.extensions_mut().insert(AuthCtx::from(verified));

    Ok(next.run(req).await)
}

fn bearer_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
}

/// Pull the token out of an `Authorization` value.
///
/// The `Bearer` scheme is optional and matched case-insensitively; a bare
/// token is taken as is. `None` when nothing is left after stripping.
pub fn bearer_token(value: &str) -> Option<&str> {
    let value = value.trim_start();

    let rest = match value.get(..BEARER.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER) => {
            let rest = &value[BEARER.len()..];
            // "Bearerxyz" is a token, not a scheme
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest
            } else {
                value
            }
        }
        _ => value,
    };

    let token = rest.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn strips_scheme_in_any_case() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("BEARER   abc.def.ghi  "), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Bearer\tabc"), Some("abc"));
    }

    #[test]
    fn bare_token_is_accepted() {
        assert_eq!(bearer_token("abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Bearerabc"), Some("Bearerabc"));
    }

    #[test]
    fn empty_after_stripping_is_none() {
        assert_eq!(bearer_token(""), None);
        assert_eq!(bearer_token("   "), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("bearer    "), None);
    }

    #[test]
    fn non_ascii_prefix_does_not_panic() {
        assert_eq!(bearer_token("bé token"), Some("bé token"));
        assert_eq!(bearer_token("ééééé"), Some("ééééé"));
    }

    #[test]
    fn header_lookup() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_from_headers(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t0k3n"));
        assert_eq!(bearer_from_headers(&headers), Some("t0k3n"));

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );
        assert_eq!(bearer_from_headers(&headers), None);
    }
}
