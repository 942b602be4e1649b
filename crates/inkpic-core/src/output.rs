//! Batch report output in JSON and JSONL.
//!
//! A JSON report is one object with the converted files, the failures and
//! the totals. A JSONL report has one line per file, tagged with its status.

use serde::Serialize;
use std::io::{self, Write};

use crate::types::{BatchSummary, FileOutcome};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single JSON object
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

/// A writer that serializes report records to JSON or JSONL format.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer. `pretty` only affects the JSON format.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
        }
    }

    /// Write a single item followed by a newline.
    pub fn write<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        if self.pretty && self.format == OutputFormat::Json {
            serde_json::to_writer_pretty(&mut self.writer, item).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
        }
        writeln!(self.writer)
    }

    /// Write a batch report.
    ///
    /// JSON writes the whole summary as one object. JSONL writes converted
    /// files in index order, then failures.
    pub fn write_summary(&mut self, summary: &BatchSummary) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write(summary),
            OutputFormat::JsonLines => {
                for file in &summary.converted {
                    self.write(&FileOutcome::Converted(file.clone()))?;
                }
                for file in &summary.failed {
                    self.write(&FileOutcome::Failed(file.clone()))?;
                }
                Ok(())
            }
        }
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
