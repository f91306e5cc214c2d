//! In-memory metadata client for scheduler and pipeline tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProcessingError;
use crate::remote::MetadataClient;
use crate::types::ImageMetadata;

/// Call lifecycle event, recorded in the order calls start and finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start(PathBuf),
    End(PathBuf),
}

/// Scriptable client: succeeds by default, with per-path failures, panics
/// and delays.
#[derive(Default)]
pub struct MockClient {
    failing: Vec<PathBuf>,
    panicking: Vec<PathBuf>,
    delay: Option<Duration>,
    delays: HashMap<PathBuf, Duration>,
    call_count: Arc<AtomicU32>,
    in_flight: Arc<AtomicU32>,
    max_concurrent: Arc<AtomicU32>,
    events: Arc<Mutex<Vec<Event>>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(mut self, path: &str) -> Self {
        self.failing.push(PathBuf::from(path));
        self
    }

    pub fn panic_on(mut self, path: &str) -> Self {
        self.panicking.push(PathBuf::from(path));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_delay_for(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(PathBuf::from(path), delay);
        self
    }

    pub fn call_count_handle(&self) -> Arc<AtomicU32> {
        self.call_count.clone()
    }

    /// (in_flight, max_concurrent)
    pub fn concurrency_handles(&self) -> (Arc<AtomicU32>, Arc<AtomicU32>) {
        (self.in_flight.clone(), self.max_concurrent.clone())
    }

    pub fn events_handle(&self) -> Arc<Mutex<Vec<Event>>> {
        self.events.clone()
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

/// Successful record the mock produces for `path`.
pub fn mock_metadata(path: &Path) -> ImageMetadata {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    ImageMetadata {
        source_path: path.to_path_buf(),
        title: format!("Title for {name}"),
        description: format!("Description of {name}."),
        tags: vec!["mock".to_string(), name],
        is_error: false,
    }
}

#[async_trait]
impl MetadataClient for MockClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_metadata(&self, path: &Path) -> Result<ImageMetadata, ProcessingError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_concurrent.fetch_max(current, Ordering::SeqCst);
        self.record(Event::Start(path.to_path_buf()));

        if let Some(delay) = self.delays.get(path).copied().or(self.delay) {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.record(Event::End(path.to_path_buf()));

        if self.panicking.iter().any(|p| p == path) {
            panic!("mock client panicked on {path:?}");
        }
        if self.failing.iter().any(|p| p == path) {
            return Err(ProcessingError::Request {
                path: path.to_path_buf(),
                message: "mock failure".to_string(),
                status_code: Some(500),
            });
        }
        Ok(mock_metadata(path))
    }
}
