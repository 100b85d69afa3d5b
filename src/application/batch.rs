//! Bounded fan-out for bulk conversation fetches.

use futures::stream::{self, StreamExt};

use crate::domain::{BatchPolicy, Result};

/// Run `fetch` over every item and aggregate per the given policy.
///
/// Every fetch runs to completion before aggregation starts; a failure does
/// not cancel its siblings. Without `allow_partial`, one failure fails the
/// whole batch with the first error in input order and no values are
/// returned. With `allow_partial`, failed items are dropped with a warning
/// and the survivors come back in input order; a non-empty batch where every
/// item failed still errors.
///
/// # Errors
/// Returns the first error in input order, subject to the partial rules.
pub async fn run_batch<I, T, F, Fut>(
    items: Vec<I>,
    policy: BatchPolicy,
    fetch: F,
) -> Result<Vec<T>>
where
    F: Fn(I) -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let width = policy.max_concurrency.unwrap_or(items.len()).max(1);
    let results: Vec<Result<T>> = stream::iter(items.into_iter().map(fetch))
        .buffered(width)
        .collect()
        .await;

    if !policy.allow_partial {
        return results.into_iter().collect();
    }

    let total = results.len();
    let mut fetched = Vec::with_capacity(total);
    let mut first_error = None;
    for result in results {
        match result {
            Ok(value) => fetched.push(value),
            Err(err) => {
                tracing::warn!("Dropping failed item from partial batch: {}", err);
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    if let Some(err) = first_error {
        if fetched.is_empty() {
            return Err(err);
        }
        tracing::warn!("Bulk fetch kept {} of {} conversations", fetched.len(), total);
    }

    Ok(fetched)
}
