//! Image processing pipeline components.
//!
//! - **discovery**: Expand files and folders into candidate paths
//! - **validate**: Existence, extension and size checks
//! - **scheduler**: Bounded-concurrency remote calls
//! - **progress**: Per-success progress sinks
//! - **processor**: Orchestrates validation and scheduling

pub mod discovery;
pub mod processor;
pub mod progress;
pub mod scheduler;
pub mod validate;

pub use discovery::FileDiscovery;
pub use processor::{ImageProcessor, ProcessOptions};
pub use progress::{progress_channel, ChannelSink, NoProgress, ProgressSink};
pub use scheduler::{BatchScheduler, SchedulerOptions, DEFAULT_CONCURRENCY};
pub use validate::Validator;
