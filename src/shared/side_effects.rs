//! Non-critical side effects attached to a primary operation.
//!
//! The primary result is already committed by the time these run. A failure
//! here is logged and dropped; it never reaches the caller.

use std::future::Future;

use crate::core::error::Result;

/// Run `effect`, logging and swallowing any error.
///
/// Returns `Some` with the effect's value on success.
pub async fn best_effort<T, F>(context: &str, effect: F) -> Option<T>
where
    F: Future<Output = Result<T>>,
{
    match effect.await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Non-critical side effect failed ({}): {}", context, e);
            None
        }
    }
}
