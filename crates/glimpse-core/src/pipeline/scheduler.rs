//! Bounded-concurrency batch scheduler.
//!
//! Runs one remote call per image with at most `concurrency` calls in
//! flight. Two admission strategies share the same contract:
//!
//! - [`Schedule::Chunked`]: contiguous groups of `concurrency` images; every
//!   call in a group settles before the next group starts.
//! - [`Schedule::Sliding`]: a semaphore admits the next image as soon as any
//!   slot frees.
//!
//! Per-image failures never abort siblings. Each success notifies the
//! progress sink exactly once; failures never do.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;

use crate::config::{Config, Schedule};
use crate::error::{PipelineError, PipelineResult, ProcessingError};
use crate::remote::MetadataClient;
use crate::types::{ImageMetadata, ItemOutcome};

use super::progress::ProgressSink;

/// Concurrency used when the caller does not pick one.
pub const DEFAULT_CONCURRENCY: usize = 3;

/// Configuration for the scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerOptions {
    /// Maximum concurrent remote calls
    pub concurrency: usize,
    /// Admission strategy
    pub schedule: Schedule,
    /// Per-request timeout in milliseconds; `None` waits indefinitely
    pub timeout_ms: Option<u64>,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            schedule: Schedule::Chunked,
            timeout_ms: None,
        }
    }
}

impl SchedulerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            concurrency: config.processing.concurrency,
            schedule: config.processing.schedule,
            timeout_ms: config.limits.request_timeout_ms,
        }
    }

    /// Same options with a different concurrency (clamped to at least 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// A settled item, tagged with its input position.
struct Completion {
    index: usize,
    outcome: ItemOutcome,
}

/// Runs batches of remote metadata calls.
pub struct BatchScheduler {
    client: Arc<dyn MetadataClient>,
    options: SchedulerOptions,
}

impl BatchScheduler {
    pub fn new(client: Arc<dyn MetadataClient>, options: SchedulerOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &SchedulerOptions {
        &self.options
    }

    /// Process every path and return the successes only.
    ///
    /// Groups keep their order; within a group records appear in completion
    /// order. Failed images are logged and left out.
    pub async fn run_batch(
        &self,
        paths: &[PathBuf],
        sink: Arc<dyn ProgressSink>,
    ) -> PipelineResult<Vec<ImageMetadata>> {
        let completions = self.run(paths, sink).await?;
        Ok(completions
            .into_iter()
            .filter_map(|c| c.outcome.result.ok())
            .collect())
    }

    /// Process every path and return one outcome per input, in input order.
    pub async fn run_batch_outcomes(
        &self,
        paths: &[PathBuf],
        sink: Arc<dyn ProgressSink>,
    ) -> PipelineResult<Vec<ItemOutcome>> {
        let mut completions = self.run(paths, sink).await?;
        completions.sort_by_key(|c| c.index);
        Ok(completions.into_iter().map(|c| c.outcome).collect())
    }

    /// Run the batch, returning completions in the order they settled.
    async fn run(
        &self,
        paths: &[PathBuf],
        sink: Arc<dyn ProgressSink>,
    ) -> PipelineResult<Vec<Completion>> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let concurrency = self.options.concurrency.max(1);
        tracing::debug!(
            "Scheduling {} image(s) via {} ({:?}, concurrency {})",
            paths.len(),
            self.client.name(),
            self.options.schedule,
            concurrency
        );

        let completions = match self.options.schedule {
            Schedule::Chunked => self.run_chunked(paths, concurrency, sink).await?,
            Schedule::Sliding => self.run_sliding(paths, concurrency, sink).await?,
        };

        let succeeded = completions
            .iter()
            .filter(|c| c.outcome.is_success())
            .count();
        let failed = completions.len() - succeeded;
        if failed > 0 {
            tracing::warn!("Batch finished: {succeeded} succeeded, {failed} failed");
        } else {
            tracing::info!("Batch finished: {succeeded} succeeded");
        }

        Ok(completions)
    }

    async fn run_chunked(
        &self,
        paths: &[PathBuf],
        concurrency: usize,
        sink: Arc<dyn ProgressSink>,
    ) -> PipelineResult<Vec<Completion>> {
        let group_count = paths.len().div_ceil(concurrency);
        let mut completions = Vec::with_capacity(paths.len());

        for (group_idx, group) in paths.chunks(concurrency).enumerate() {
            tracing::debug!(
                "Starting group {}/{} ({} image(s))",
                group_idx + 1,
                group_count,
                group.len()
            );
            let base = group_idx * concurrency;
            let pending: FuturesUnordered<_> = group
                .iter()
                .enumerate()
                .map(|(offset, path)| self.spawn_item(base + offset, path, &sink, None))
                .collect();

            // Barrier: the whole group settles before the next one starts.
            collect_settled(pending, &mut completions).await?;
        }

        Ok(completions)
    }

    async fn run_sliding(
        &self,
        paths: &[PathBuf],
        concurrency: usize,
        sink: Arc<dyn ProgressSink>,
    ) -> PipelineResult<Vec<Completion>> {
        let semaphore = Arc::new(Semaphore::new(concurrency));
        let mut pending = FuturesUnordered::new();

        for (index, path) in paths.iter().enumerate() {
            let permit = semaphore.clone().acquire_owned().await.map_err(|_| {
                PipelineError::Scheduler("concurrency semaphore closed unexpectedly".to_string())
            })?;
            pending.push(self.spawn_item(index, path, &sink, Some(permit)));
        }

        let mut completions = Vec::with_capacity(paths.len());
        collect_settled(pending, &mut completions).await?;
        Ok(completions)
    }

    fn spawn_item(
        &self,
        index: usize,
        path: &Path,
        sink: &Arc<dyn ProgressSink>,
        permit: Option<OwnedSemaphorePermit>,
    ) -> JoinHandle<Completion> {
        let client = self.client.clone();
        let sink = sink.clone();
        let path = path.to_path_buf();
        let timeout_ms = self.options.timeout_ms;

        tokio::spawn(async move {
            let result = fetch_one(client.as_ref(), &path, timeout_ms).await;
            drop(permit); // Release the slot before reporting
            match &result {
                Ok(_) => sink.on_item_done(&path),
                Err(e) => tracing::error!("Dropping {:?}: {e}", path),
            }
            Completion {
                index,
                outcome: ItemOutcome { path, result },
            }
        })
    }
}

/// Drain spawned items in settle order.
///
/// A task that panicked is a systemic failure: the remaining tasks are
/// aborted and the error is returned.
async fn collect_settled(
    mut pending: FuturesUnordered<JoinHandle<Completion>>,
    completions: &mut Vec<Completion>,
) -> PipelineResult<()> {
    while let Some(joined) = pending.next().await {
        match joined {
            Ok(completion) => completions.push(completion),
            Err(e) => {
                for handle in pending.iter() {
                    handle.abort();
                }
                return Err(PipelineError::Scheduler(format!(
                    "image task did not complete: {e}"
                )));
            }
        }
    }
    Ok(())
}

async fn fetch_one(
    client: &dyn MetadataClient,
    path: &Path,
    timeout_ms: Option<u64>,
) -> Result<ImageMetadata, ProcessingError> {
    let Some(timeout_ms) = timeout_ms else {
        return client.fetch_metadata(path).await;
    };
    tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        client.fetch_metadata(path),
    )
    .await
    .unwrap_or_else(|_| {
        Err(ProcessingError::Timeout {
            path: path.to_path_buf(),
            timeout_ms,
        })
    })
}
