pub mod event;
pub mod interval;
pub mod report;


use log::{debug, info, warn};
use std::io::Write;

use crate::config::ExtractorConfig;
use crate::error::Result;

pub use event::{
    classify_line, filter_photo_lines, load_log, parse_events, parse_line, CaptureEvent,
    SkipReason,
};
pub use interval::{compute_intervals, format_seconds, pair_intervals, Interval};
pub use report::{write_report, ReportStats, HEADER, PLACEHOLDER};

/// Counts from one extractor run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines_read: usize,
    pub photo_lines: usize,
    pub events: usize,
    pub skipped_no_match: usize,
    pub skipped_invalid_timestamp: usize,
    pub rows_written: usize,
    pub header_written: bool,
}

impl RunSummary {
    pub fn skipped(&self) -> usize {
        self.skipped_no_match + self.skipped_invalid_timestamp
    }
}

/// Run the extractor once: load the capture log, pull out the capture
/// events, diff neighbours and append the result to the report.
pub fn run<W: Write>(config: &ExtractorConfig, console: &mut W) -> Result<RunSummary> {
    info!("Reading capture log {:?}", config.log_path);
    let lines = load_log(&config.log_path)?;
    let photo_lines = filter_photo_lines(&lines);

    let mut summary = RunSummary {
        lines_read: lines.len(),
        photo_lines: photo_lines.len(),
        ..RunSummary::default()
    };

    let mut events = Vec::with_capacity(photo_lines.len());
    for line in &photo_lines {
        match classify_line(line) {
            Ok(event) => events.push(event),
            Err(reason) => {
                match reason {
                    SkipReason::NoMatch => summary.skipped_no_match += 1,
                    SkipReason::InvalidTimestamp => summary.skipped_invalid_timestamp += 1,
                }
                if config.log_skipped {
                    debug!("Skipping line {:?}: {}", line, reason);
                }
            }
        }
    }
    summary.events = events.len();

    let intervals = pair_intervals(&events);
    if intervals.is_empty() {
        warn!(
            "Found {} capture event(s) in {:?}, no intervals to report",
            events.len(),
            config.log_path
        );
    }

    let stats = write_report(&config.output_path, &intervals, config.write_mode, console)?;
    summary.rows_written = stats.rows_written;
    summary.header_written = stats.header_written;

    info!(
        "Wrote {} interval(s) to {:?} ({} of {} photo lines skipped)",
        summary.rows_written,
        config.output_path,
        summary.skipped(),
        summary.photo_lines
    );

    Ok(summary)
}
