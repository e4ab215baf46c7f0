//! First success from an ordered sequence of fallible probes

use std::future::Future;

/// Run `probe` over `items` in order, one at a time, and return the first
/// `Some`. Later items are never probed once one succeeds.
///
/// Probes report failure as `None`; callers that need the reason log it
/// before returning.
pub async fn first_success<I, F, Fut, T>(items: I, mut probe: F) -> Option<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    for item in items {
        if let Some(found) = probe(item).await {
            return Some(found);
        }
    }
    None
}
