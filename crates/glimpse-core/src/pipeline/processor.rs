//! Pipeline orchestration: validate, then hand the survivors to the scheduler.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult, ProcessingError};
use crate::remote::MetadataClient;
use crate::types::{ImageMetadata, ItemOutcome};

use super::discovery::FileDiscovery;
use super::progress::ProgressSink;
use super::scheduler::{BatchScheduler, SchedulerOptions};
use super::validate::Validator;

/// Per-run overrides on top of the loaded config.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Override `processing.concurrency`
    pub concurrency: Option<usize>,
}

/// Entry point of the pipeline.
///
/// Built once per process with an explicit client and passed to whoever
/// needs it.
pub struct ImageProcessor {
    validator: Validator,
    discovery: FileDiscovery,
    scheduler: BatchScheduler,
}

impl ImageProcessor {
    /// Create a processor that calls `client` for every valid image.
    pub fn new(config: &Config, client: Arc<dyn MetadataClient>) -> Self {
        Self::with_options(config, client, &ProcessOptions::default())
    }

    pub fn with_options(
        config: &Config,
        client: Arc<dyn MetadataClient>,
        options: &ProcessOptions,
    ) -> Self {
        let mut scheduler_options = SchedulerOptions::from_config(config);
        if let Some(concurrency) = options.concurrency {
            scheduler_options = scheduler_options.with_concurrency(concurrency);
        }

        Self {
            validator: Validator::new(&config.processing),
            discovery: FileDiscovery::new(&config.processing),
            scheduler: BatchScheduler::new(client, scheduler_options),
        }
    }

    /// Expand a selection of files and folders into candidate paths.
    pub fn discover<P: AsRef<Path>>(&self, selection: &[P]) -> Vec<PathBuf> {
        self.discovery.expand(selection)
    }

    /// Keep the paths that point at non-empty files with a supported extension.
    pub fn validate<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<PathBuf> {
        self.validator.validate(paths)
    }

    /// Generate metadata for every valid image, dropping failures.
    ///
    /// Fails with [`PipelineError::NoValidImages`] before any remote call when
    /// nothing survives validation.
    pub async fn process_images<P: AsRef<Path>>(
        &self,
        paths: &[P],
        sink: Arc<dyn ProgressSink>,
    ) -> PipelineResult<Vec<ImageMetadata>> {
        let valid = self.validated_or_fail(paths)?;
        self.scheduler.run_batch(&valid, sink).await
    }

    /// Like [`process_images`](Self::process_images), but returns one outcome
    /// per valid image, in validation order.
    pub async fn process_images_detailed<P: AsRef<Path>>(
        &self,
        paths: &[P],
        sink: Arc<dyn ProgressSink>,
    ) -> PipelineResult<Vec<ItemOutcome>> {
        let valid = self.validated_or_fail(paths)?;
        self.scheduler.run_batch_outcomes(&valid, sink).await
    }

    /// Detailed run over paths the caller already passed through
    /// [`validate`](Self::validate). No path is checked again.
    pub async fn process_validated_detailed(
        &self,
        valid: &[PathBuf],
        sink: Arc<dyn ProgressSink>,
    ) -> PipelineResult<Vec<ItemOutcome>> {
        self.ensure_any(valid, valid.len())?;
        self.scheduler.run_batch_outcomes(valid, sink).await
    }

    /// Placeholder record for an image that could not be processed.
    pub fn build_error_record(error: &ProcessingError, path: &Path) -> ImageMetadata {
        ImageMetadata::from_error(error, path)
    }

    /// Concurrency the scheduler will use.
    pub fn concurrency(&self) -> usize {
        self.scheduler.options().concurrency
    }

    fn validated_or_fail<P: AsRef<Path>>(&self, paths: &[P]) -> PipelineResult<Vec<PathBuf>> {
        let valid = self.validator.validate(paths);
        self.ensure_any(&valid, paths.len())?;
        Ok(valid)
    }

    fn ensure_any(&self, valid: &[PathBuf], requested: usize) -> PipelineResult<()> {
        if valid.is_empty() {
            return Err(PipelineError::NoValidImages);
        }
        tracing::info!(
            "Processing {} of {} image(s) with concurrency {}",
            valid.len(),
            requested,
            self.concurrency()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::progress::NoProgress;
    use crate::testing::MockClient;
    use std::sync::atomic::Ordering;

    fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[tokio::test]
    async fn test_empty_input_fails_without_calls() {
        let client = MockClient::new();
        let calls = client.call_count_handle();
        let processor = ImageProcessor::new(&Config::default(), Arc::new(client));

        let empty: [PathBuf; 0] = [];
        let err = processor
            .process_images(&empty, Arc::new(NoProgress))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::NoValidImages));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_all_invalid_fails_without_calls() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write_file(&dir, "doc.txt", b"text");
        let blank = write_file(&dir, "blank.png", b"");

        let client = MockClient::new();
        let calls = client.call_count_handle();
        let processor = ImageProcessor::new(&Config::default(), Arc::new(client));

        let err = processor
            .process_images_detailed(&[doc, blank, dir.path().join("missing.jpg")], Arc::new(NoProgress))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::NoValidImages));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_only_valid_images_reach_client() {
        let dir = tempfile::tempdir().unwrap();
        let cat = write_file(&dir, "cat.jpg", b"jpeg bytes");
        let doc = write_file(&dir, "doc.txt", b"text");
        let missing = dir.path().join("missing.jpg");

        let client = MockClient::new();
        let calls = client.call_count_handle();
        let processor = ImageProcessor::new(&Config::default(), Arc::new(client));

        let results = processor
            .process_images(&[cat.clone(), missing, doc], Arc::new(NoProgress))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source_path, cat);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_detailed_reports_failures_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.png", b"1");
        let b = write_file(&dir, "b.png", b"2");
        let c = write_file(&dir, "c.png", b"3");

        let client = MockClient::new().fail_on(b.to_str().unwrap());
        let processor = ImageProcessor::new(&Config::default(), Arc::new(client));

        let outcomes = processor
            .process_images_detailed(&[a.clone(), b.clone(), c.clone()], Arc::new(NoProgress))
            .await
            .unwrap();

        let paths: Vec<_> = outcomes.iter().map(|o| o.path.clone()).collect();
        assert_eq!(paths, vec![a, b.clone(), c]);

        let records: Vec<_> = outcomes.into_iter().map(ItemOutcome::into_record).collect();
        assert!(!records[0].is_error);
        assert!(records[1].is_error);
        assert_eq!(records[1].source_path, b);
        assert_eq!(records[1].tags, vec!["error"]);
    }

    #[tokio::test]
    async fn test_validated_paths_are_not_checked_again() {
        let dir = tempfile::tempdir().unwrap();
        let cat = write_file(&dir, "cat.jpg", b"jpeg bytes");

        let client = MockClient::new();
        let calls = client.call_count_handle();
        let processor = ImageProcessor::new(&Config::default(), Arc::new(client));

        let valid = processor.validate(&[cat.clone()]);
        std::fs::remove_file(&cat).unwrap();

        let outcomes = processor
            .process_validated_detailed(&valid, Arc::new(NoProgress))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].path, cat);
    }

    #[tokio::test]
    async fn test_validated_empty_fails_without_calls() {
        let client = MockClient::new();
        let calls = client.call_count_handle();
        let processor = ImageProcessor::new(&Config::default(), Arc::new(client));

        let err = processor
            .process_validated_detailed(&[], Arc::new(NoProgress))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::NoValidImages));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_build_error_record() {
        let err = ProcessingError::Request {
            path: PathBuf::from("/p/img.jpg"),
            message: "HTTP 500".to_string(),
            status_code: Some(500),
        };
        let record = ImageProcessor::build_error_record(&err, Path::new("/p/img.jpg"));
        assert!(record.is_error);
        assert_eq!(record.title, crate::types::ERROR_TITLE);
        assert!(record.description.contains("HTTP 500"));
    }

    #[test]
    fn test_concurrency_override() {
        let config = Config::default();
        let processor = ImageProcessor::new(&config, Arc::new(MockClient::new()));
        assert_eq!(processor.concurrency(), 3);

        let options = ProcessOptions {
            concurrency: Some(8),
        };
        let processor = ImageProcessor::with_options(&config, Arc::new(MockClient::new()), &options);
        assert_eq!(processor.concurrency(), 8);
    }
}
