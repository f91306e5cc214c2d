//! Batch run with a progress bar and a closing summary.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use glimpse_core::{ImageMetadata, ImageProcessor, ItemOutcome, ProcessingStats, ProgressSink};
use indicatif::{ProgressBar, ProgressStyle};

/// Everything a finished run produced.
pub struct BatchReport {
    pub outcomes: Vec<ItemOutcome>,
    pub stats: ProcessingStats,
}

impl BatchReport {
    /// Records to emit, in input order.
    ///
    /// Failures become placeholder records when `keep_errors` is set and are
    /// dropped otherwise.
    pub fn into_records(self, keep_errors: bool) -> Vec<ImageMetadata> {
        self.outcomes
            .into_iter()
            .filter_map(|outcome| match outcome.result {
                Ok(record) => Some(record),
                Err(e) if keep_errors => {
                    Some(ImageProcessor::build_error_record(&e, &outcome.path))
                }
                Err(_) => None,
            })
            .collect()
    }
}

/// Validate, process and summarize.
pub async fn run_batch(
    processor: &ImageProcessor,
    candidates: &[PathBuf],
) -> anyhow::Result<BatchReport> {
    let start = Instant::now();

    let valid = processor.validate(candidates);
    let skipped = candidates.len() - valid.len();

    let progress = create_progress_bar(valid.len() as u64);
    let result = processor
        .process_validated_detailed(&valid, progress_sink(progress.clone()))
        .await;
    progress.finish_and_clear();

    let outcomes = result?;
    let stats = ProcessingStats::from_outcomes(&outcomes, skipped, start.elapsed().as_secs_f64());
    print_summary(&stats);

    Ok(BatchReport { outcomes, stats })
}

/// Ticks the bar once per generated record.
fn progress_sink(bar: ProgressBar) -> Arc<dyn ProgressSink> {
    Arc::new(move |path: &Path| {
        bar.inc(1);
        if let Some(name) = path.file_name() {
            bar.set_message(name.to_string_lossy().into_owned());
        }
    })
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb.set_message("waiting for first result...");
    pb
}

fn print_summary(stats: &ProcessingStats) {
    let total = stats.succeeded + stats.failed + stats.skipped;

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Succeeded:    {:>8}", stats.succeeded);
    if stats.failed > 0 {
        eprintln!("    Failed:       {:>8}", stats.failed);
    }
    if stats.skipped > 0 {
        eprintln!("    Skipped:      {:>8}", stats.skipped);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", total);
    eprintln!("    Duration:     {:>7.1}s", stats.total_seconds);
    eprintln!("  ====================================");
}
