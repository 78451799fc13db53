//! Paced dispatch of many scrape operations.
//!
//! kabutan tolerates a steady trickle of requests but not a burst, so
//! operations are spawned a fixed interval apart. Pacing governs dispatch
//! only: earlier operations keep running while later ones start, and the
//! in-flight count is not bounded.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::error::ScraperError;

/// Runs `op` over every item, dispatching them `interval` apart, and
/// joins the results in input order.
///
/// Items whose operation yields `Ok(None)` are dropped from the output.
/// An `Err` from any operation aborts the whole batch when the join
/// reaches it; operations still in flight are left to finish on their
/// own.
pub async fn run_paced<T, R, F, Fut>(
    items: Vec<T>,
    interval: Duration,
    op: F,
) -> Result<Vec<R>, ScraperError>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<Option<R>, ScraperError>> + Send + 'static,
    R: Send + 'static,
{
    let mut handles = Vec::with_capacity(items.len());
    for item in items {
        handles.push(tokio::spawn(op(item)));
        sleep(interval).await;
    }

    let mut kept = Vec::with_capacity(handles.len());
    for handle in handles {
        if let Some(result) = handle.await?? {
            kept.push(result);
        }
    }
    Ok(kept)
}
