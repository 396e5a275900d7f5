use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::WriteMode;
use crate::error::{Error, Result};

use super::interval::{format_seconds, Interval};

/// Column header of the interval report
pub const HEADER: &str = "T1\tT2\tT3\tT4\tT5\tT1-T2\tT1-T3";

/// Value for the columns that have no computed measurement yet
pub const PLACEHOLDER: &str = "N/A";

const PLACEHOLDER_COLUMNS: usize = 6;

/// What a single `write_report` call put in the file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub header_written: bool,
    pub rows_written: usize,
}

/// One report row, newline included
pub fn format_row(seconds: f64) -> String {
    let mut row = format_seconds(seconds);
    for _ in 0..PLACEHOLDER_COLUMNS {
        row.push('\t');
        row.push_str(PLACEHOLDER);
    }
    row.push('\n');
    row
}

/// Console line announcing one interval
pub fn format_console_line(interval: &Interval) -> String {
    format!(
        "Time difference between {} and {}: {} seconds",
        interval.from,
        interval.to,
        format_seconds(interval.seconds)
    )
}

fn open_report(path: &Path, mode: WriteMode) -> std::io::Result<(File, bool)> {
    match mode {
        WriteMode::Append => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let empty = file.metadata()?.len() == 0;
            Ok((file, empty))
        }
        WriteMode::Truncate => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
            Ok((file, true))
        }
    }
}

/// Write the intervals to the report and echo each one to `console`.
///
/// The header goes in only when the file is new or empty (append mode) or
/// unconditionally after truncation. The file handle is closed before
/// returning on every path.
pub fn write_report<W: Write>(
    path: &Path,
    intervals: &[Interval],
    mode: WriteMode,
    console: &mut W,
) -> Result<ReportStats> {
    let report_err = |source| Error::ReportWrite {
        path: path.to_path_buf(),
        source,
    };

    let (file, header_written) = open_report(path, mode).map_err(report_err)?;
    let mut out = BufWriter::new(file);

    if header_written {
        writeln!(out, "{}", HEADER).map_err(report_err)?;
    }

    let mut stats = ReportStats {
        header_written,
        rows_written: 0,
    };

    for interval in intervals {
        out.write_all(format_row(interval.seconds).as_bytes())
            .map_err(report_err)?;
        stats.rows_written += 1;

        writeln!(console, "{}", format_console_line(interval)).map_err(Error::Console)?;
    }

    out.flush().map_err(report_err)?;
    console.flush().map_err(Error::Console)?;

    Ok(stats)
}
