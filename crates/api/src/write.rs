//! Store writes raced against the configured write timeout.
//!
//! The write runs on its own task. If the timer wins, the client gets
//! [`AppError::Timeout`] while the write keeps going in the background and
//! may still land.

use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Run `write` with a deadline of `limit`.
///
/// `what` names the operation in the timeout message and logs.
pub async fn with_write_timeout<T, E, F>(limit: Duration, what: &'static str, write: F) -> AppResult<T>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Into<AppError> + Send + 'static,
{
    let handle = tokio::spawn(write);
    match tokio::time::timeout(limit, handle).await {
        Ok(Ok(result)) => result.map_err(Into::into),
        Ok(Err(join_err)) => Err(AppError::InternalError(format!(
            "{what} task failed: {join_err}"
        ))),
        Err(_) => {
            tracing::warn!(operation = what, limit_secs = limit.as_secs(), "Write timed out");
            Err(AppError::Timeout(format!(
                "{what} did not complete within {} seconds",
                limit.as_secs()
            )))
        }
    }
}
