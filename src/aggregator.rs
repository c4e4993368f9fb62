//! Concurrent fan-out over all configured sources.
//!
//! [`aggregate`] spawns one task per source, waits for every task, and
//! places each result at its source's configuration index. A source that
//! errors or panics is logged and replaced by an empty
//! [`SourceResult::placeholder`], so the output always has one entry per
//! source in configuration order and the call itself cannot fail.
//!
//! There is no overall deadline: the call is as slow as the slowest source,
//! bounded only by the fetcher's per-request timeout.
//!
//! The source tasks belong to the returned future. Dropping that future
//! aborts them, so callers that must not lose the work when their own caller
//! goes away (the HTTP gateway) run [`aggregate`] on a spawned task.

use crate::models::{AggregateResult, SourceResult};
use crate::scrapers::Source;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, instrument};

/// Fetch headlines from every source concurrently.
///
/// `result[i]` always corresponds to `sources[i]`, whatever order the
/// tasks complete in.
#[instrument(level = "info", skip_all, fields(sources = sources.len()))]
pub async fn aggregate(sources: &[Arc<dyn Source>]) -> AggregateResult {
    let mut tasks = JoinSet::new();
    let mut task_index = HashMap::with_capacity(sources.len());
    for (index, source) in sources.iter().enumerate() {
        let source = Arc::clone(source);
        let handle = tasks.spawn(async move { (index, source.fetch_headlines().await) });
        task_index.insert(handle.id(), index);
    }

    let mut slots: Vec<Option<SourceResult>> = sources.iter().map(|_| None).collect();
    let mut failed = 0usize;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(result))) => slots[index] = Some(result),
            Ok((index, Err(e))) => {
                failed += 1;
                error!(
                    source = %sources[index].metadata().name,
                    error = %e,
                    "Failed to fetch headlines; serving empty placeholder"
                );
            }
            Err(e) => {
                failed += 1;
                let source = task_index
                    .get(&e.id())
                    .map(|&index| sources[index].metadata().name)
                    .unwrap_or_default();
                error!(
                    %source,
                    error = %e,
                    "Source task did not complete; serving empty placeholder"
                );
            }
        }
    }

    let results: AggregateResult = slots
        .into_iter()
        .zip(sources)
        .map(|(slot, source)| slot.unwrap_or_else(|| SourceResult::placeholder(source.metadata())))
        .collect();

    info!(
        total = results.len(),
        failed,
        headlines = results.iter().map(|r| r.items.len()).sum::<usize>(),
        "Aggregated headlines"
    );
    results
}
