pub mod config;
pub mod error;
pub mod extractor;

// Re-export main components for easier use
pub use config::{load_config, Config, ExtractorConfig, WriteMode};
pub use error::{Error, Result};
pub use extractor::{run, CaptureEvent, Interval, RunSummary, SkipReason};
