//! Request body / path / query extraction with `AppError` rejections.
//!
//! axum's own rejections answer in `text/plain` with 400/415/422. Handlers
//! take `Result<Json<T>, JsonRejection>` (and the Path/Query equivalents)
//! and run them through these helpers so every bad input is a 400 `{code, msg}`.
//!
//! ```ignore
//! async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
//!     let req = extract_validated_json(body)?;
//! }
//! ```

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};

use crate::error::AppError;

/// Shape checks a DTO runs after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), &'static str>;
}

pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::invalid_request(err.body_text()))
}

pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::invalid_request)?;
    Ok(value)
}

pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    result
        .map(|Path(v)| v)
        .map_err(|err| AppError::invalid_request(err.body_text()))
}

pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::invalid_request(err.body_text()))
}
