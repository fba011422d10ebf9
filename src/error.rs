/*
 * Responsibility
 * - the application-wide AppError
 * - IntoResponse (HTTP status + JSON body `{ code, msg }`)
 * - conversions from repo / password errors
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::password::PasswordError;

pub const MSG_NO_TOKEN: &str = "No token, authorization denied";
pub const MSG_INVALID_TOKEN: &str = "Token is not valid";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub msg: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    // Both credential failures share the 401 status; only the message differs.
    #[error("{}", MSG_NO_TOKEN)]
    MissingCredential,

    #[error("{}", MSG_INVALID_TOKEN)]
    InvalidCredential,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("{0}")]
    Conflict(String),

    #[error("request timed out")]
    Timeout,

    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential | AppError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::MissingCredential | AppError::InvalidCredential => "UNAUTHORIZED",
            AppError::InvalidRequest(_) => "BAD_REQUEST",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Timeout => "REQUEST_TIMEOUT",
            AppError::Internal => "INTERNAL",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            code: self.code(),
            msg: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict(message) => AppError::Conflict(message.to_string()),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        tracing::error!(error = %e, "password hashing failed");
        AppError::Internal
    }
}
