//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::HandoffError;

/// Wrap a fallible future with a deadline.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, HandoffError>>,
) -> Result<T, HandoffError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(HandoffError::Timeout(duration.as_millis() as u64)),
    }
}
