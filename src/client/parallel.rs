//! Concurrent fetching of the remaining call-log pages.

use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use crate::error::Result;

type PageFuture<T> = Pin<Box<dyn Future<Output = (usize, Result<Vec<T>>)> + Send>>;

/// Fetch `pages` with at most `max_concurrent` requests in flight.
///
/// Results are returned in page order regardless of arrival order, so the
/// call log keeps the backend's sort. The first failing page aborts the
/// whole fetch.
///
/// ```ignore
/// let first = client.list_calls(&params, &filters).await?;
/// let rest = fetch_remaining_pages(
///     first.remaining_pages(),
///     move |page| {
///         let c = client.clone();
///         let f = filters.clone();
///         async move {
///             let params = PaginationParams::new().page_size(100).page(page);
///             Ok(c.list_calls(&params, &f).await?.items)
///         }
///     },
///     8,
/// ).await?;
/// ```
pub async fn fetch_remaining_pages<T, F, Fut>(
    pages: Vec<usize>,
    fetch_page: F,
    max_concurrent: usize,
) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>>> + Send + 'static,
{
    if pages.is_empty() {
        return Ok(Vec::new());
    }

    debug!(
        "Fetching {} remaining pages, {} at a time",
        pages.len(),
        max_concurrent
    );

    let make_future = |page: usize| -> PageFuture<T> {
        let fut = fetch_page(page);
        Box::pin(async move { (page, fut.await) })
    };

    let mut in_flight: FuturesUnordered<PageFuture<T>> = FuturesUnordered::new();
    let mut pending = pages.into_iter();
    for page in pending.by_ref().take(max_concurrent.max(1)) {
        in_flight.push(make_future(page));
    }

    let mut fetched: Vec<(usize, Vec<T>)> = Vec::new();
    while let Some((page, result)) = in_flight.next().await {
        let items = result?;
        debug!("Page {} returned {} calls", page, items.len());
        fetched.push((page, items));

        if let Some(next) = pending.next() {
            in_flight.push(make_future(next));
        }
    }

    fetched.sort_by_key(|(page, _)| *page);
    Ok(fetched.into_iter().flat_map(|(_, items)| items).collect())
}
