//! Bounded-concurrency enrichment of a hit list.
//!
//! One task is spawned per hit; each must acquire a permit from a semaphore
//! owned by [`enrich`] before resolving, so at most `concurrency`
//! resolutions are in flight. As soon as one finishes its permit is released
//! and the next waiting hit starts. Results are collected by input index, so
//! the output order is the input order no matter which task completes first.

use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::config::EnrichmentConfig;
use crate::models::{DescriptionResult, SearchHit};
use crate::resolve::SourceResolver;

/// Resolve descriptions for every hit, returning one result per hit in input
/// order.
///
/// With `fetch_descriptions` off no task is spawned and no request is made.
pub async fn enrich(
    hits: Vec<SearchHit>,
    config: &EnrichmentConfig,
    resolver: Arc<SourceResolver>,
) -> Vec<DescriptionResult> {
    if !config.fetch_descriptions {
        return hits.into_iter().map(DescriptionResult::unresolved).collect();
    }

    // Never more permits than hits; keeps huge values under `Semaphore::MAX_PERMITS`.
    let permits = config.concurrency.min(hits.len()).max(1);
    let semaphore = Arc::new(Semaphore::new(permits));
    let timeout = config.timeout();
    let mut handles = Vec::with_capacity(hits.len());

    for (index, hit) in hits.iter().enumerate() {
        let hit = hit.clone();
        let sem = semaphore.clone();
        let resolver = resolver.clone();

        let handle = tokio::spawn(async move {
            let _permit = match sem.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return DescriptionResult::unresolved(hit),
            };
            debug!(index, hit = %hit.id(), "resolving");
            resolver.resolve(&hit, timeout).await
        });

        handles.push(handle);
    }

    let mut results = Vec::with_capacity(hits.len());
    for (handle, hit) in handles.into_iter().zip(hits) {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => {
                warn!(hit = %hit.id(), error = %e, "resolution task failed");
                results.push(DescriptionResult::unresolved(hit));
            }
        }
    }

    results
}
