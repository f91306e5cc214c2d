//! Progress reporting for batch runs.
//!
//! The scheduler pushes one event per successfully processed image, never
//! for failures. Events from the same group may arrive concurrently and in
//! any order, so sinks must tolerate interleaved calls.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

/// Receives one notification per successfully processed image.
pub trait ProgressSink: Send + Sync {
    fn on_item_done(&self, path: &Path);
}

impl<F> ProgressSink for F
where
    F: Fn(&Path) + Send + Sync,
{
    fn on_item_done(&self, path: &Path) {
        self(path)
    }
}

/// Channel form: each completed path is sent to the paired receiver.
#[derive(Debug, Clone)]
pub struct ChannelSink(mpsc::UnboundedSender<PathBuf>);

impl ProgressSink for ChannelSink {
    fn on_item_done(&self, path: &Path) {
        // A dropped receiver is ignored; progress is informational.
        let _ = self.0.send(path.to_path_buf());
    }
}

/// Sink that discards events.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_item_done(&self, _path: &Path) {}
}

/// Create a channel whose sender can be handed to the pipeline as a sink.
pub fn progress_channel() -> (ChannelSink, mpsc::UnboundedReceiver<PathBuf>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelSink(tx), rx)
}
