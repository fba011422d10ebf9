pub mod auth_ctx;
pub mod request;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use request::{Validate, extract_json, extract_path, extract_query, extract_validated_json};
