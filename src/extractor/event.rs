use chrono::{Datelike, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use thiserror::Error;

use crate::error::{Error, Result};

/// Substring a log line must contain to be considered at all
pub const PHOTO_MARKER: &str = "Photo";

/// Timestamp layout written by the trap nodes, microsecond precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

static CAPTURE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{6}): Photo (\S+) taken\.$")
        .expect("capture line pattern is valid")
});

/// A successfully parsed `Photo <name> taken.` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureEvent {
    pub timestamp: NaiveDateTime,
    pub name: String,
}

/// Why a Photo line produced no capture event
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    #[error("line does not match the capture pattern")]
    NoMatch,

    #[error("timestamp is not a valid date-time")]
    InvalidTimestamp,
}

/// Read the whole capture log into memory, one entry per line
pub fn load_log(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::LogRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents.lines().map(str::to_string).collect())
}

/// Keep the lines mentioning a photo, trimmed
pub fn filter_photo_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| line.contains(PHOTO_MARKER))
        .map(|line| line.trim().to_string())
        .collect()
}

/// Parse a single line, reporting why it was rejected
pub fn classify_line(line: &str) -> std::result::Result<CaptureEvent, SkipReason> {
    let captures = CAPTURE_LINE.captures(line).ok_or(SkipReason::NoMatch)?;

    let timestamp = NaiveDateTime::parse_from_str(&captures[1], TIMESTAMP_FORMAT)
        .map_err(|_| SkipReason::InvalidTimestamp)?;

    // chrono accepts :60 as a leap second, the node clock never writes one
    if timestamp.nanosecond() >= 1_000_000_000 {
        return Err(SkipReason::InvalidTimestamp);
    }
    // Calendar years start at 1
    if timestamp.year() < 1 {
        return Err(SkipReason::InvalidTimestamp);
    }

    Ok(CaptureEvent {
        timestamp,
        name: captures[2].to_string(),
    })
}

/// Lenient parse: `None` for anything that is not a well-formed capture line
pub fn parse_line(line: &str) -> Option<CaptureEvent> {
    classify_line(line).ok()
}

/// Parse every line, dropping the malformed ones and keeping log order
pub fn parse_events(lines: &[String]) -> Vec<CaptureEvent> {
    lines.iter().filter_map(|line| parse_line(line)).collect()
}
