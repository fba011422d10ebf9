/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - hand the authenticated request context (AuthCtx) to handlers
 * - axum plumbing lives in core, the type itself in types
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
