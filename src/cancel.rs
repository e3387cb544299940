//! Cooperative cancellation of in-flight calls.

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Returned instead of a response when a call was cancelled.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Operation was cancelled")]
pub struct Cancelled;

/// Runs `future` until it completes or `token` is cancelled.
///
/// On cancellation the future is dropped, which aborts the in-flight send and
/// any pending body read, and `Err(Cancelled)` is returned. A token that is
/// already cancelled prevents the call from starting.
///
/// # Examples
///
/// ```no_run
/// use issuu_client::{with_cancellation, Cancelled, Client};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example(client: Client) {
/// let token = CancellationToken::new();
/// let guard = token.clone();
///
/// tokio::spawn(async move {
///     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
///     guard.cancel();
/// });
///
/// match with_cancellation(client.publications().list(None, None), &token).await {
///     Ok(response) => println!("status {}", response.status_code()),
///     Err(Cancelled) => println!("gave up"),
/// }
/// # }
/// ```
pub async fn with_cancellation<F>(
    future: F,
    token: &CancellationToken,
) -> Result<F::Output, Cancelled>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            tracing::debug!("Call cancelled");
            Err(Cancelled)
        }
        output = future => Ok(output),
    }
}
