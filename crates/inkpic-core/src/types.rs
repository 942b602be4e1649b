//! Core data types for the inkpic conversion pipeline.
//!
//! These types describe the frame geometry and the outcome of converting a
//! batch of photos.

use serde::Serialize;
use std::path::PathBuf;

use crate::error::{ErrorKind, PipelineError};

/// Fixed output geometry of the e-paper frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    pub width: u32,
    pub height: u32,
}

impl FrameGeometry {
    /// The 800x480 panel every output image is sized for.
    pub const FRAME: FrameGeometry = FrameGeometry {
        width: 800,
        height: 480,
    };

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// A source image successfully written to the destination directory.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedFile {
    /// Sequence number of the output file
    pub index: usize,

    /// Absolute path of the source photo
    pub source: PathBuf,

    /// Path of the written bitmap
    pub destination: PathBuf,

    /// Source dimensions after orientation normalization
    pub source_width: u32,
    pub source_height: u32,

    /// EXIF orientation that was applied (1-8), if the source had one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<u8>,
}

/// A source image that could not be converted.
#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    /// Absolute path of the source photo
    pub source: PathBuf,

    /// Coarse failure classification
    pub kind: ErrorKind,

    /// Human-readable error
    pub message: String,
}

impl FailedFile {
    pub fn new(source: PathBuf, error: &PipelineError) -> Self {
        Self {
            source,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Result of converting one file of a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    Converted(ConvertedFile),
    Failed(FailedFile),
}

/// Accumulated result of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Files written, in index order
    pub converted: Vec<ConvertedFile>,

    /// Files skipped because a stage failed
    pub failed: Vec<FailedFile>,

    /// Total processing time in seconds
    pub total_seconds: f64,
}

impl BatchSummary {
    /// Record one file's outcome.
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Converted(file) => self.converted.push(file),
            FileOutcome::Failed(file) => self.failed.push(file),
        }
    }

    /// Number of files that made it to the destination.
    pub fn succeeded(&self) -> usize {
        self.converted.len()
    }

    /// True when every discovered file was converted.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Processing rate in images per second.
    pub fn images_per_second(&self) -> f64 {
        if self.total_seconds > 0.0 {
            self.converted.len() as f64 / self.total_seconds
        } else {
            0.0
        }
    }
}
