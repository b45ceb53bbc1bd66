//! Per-call deadline for store and cache operations.

use crate::{KasirError, KasirResult};
use std::future::Future;
use std::time::Duration;

/// Default bound applied to a single MySQL or cache call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs `fut` with a deadline. Elapsed deadlines become `KasirError::Timeout`
/// naming the operation; they are never retried.
pub async fn with_timeout<Fut, T>(duration: Duration, operation: &str, fut: Fut) -> KasirResult<T>
where
    Fut: Future<Output = KasirResult<T>>,
{
    tokio::time::timeout(duration, fut).await.map_err(|_| {
        KasirError::Timeout(format!("{operation} timed out after {duration:?}"))
    })?
}
