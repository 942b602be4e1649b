//! Error types for the inkpic conversion pipeline.
//!
//! Errors are organized by stage so a failed file can be reported with its
//! path and the kind of failure (decode vs. filesystem).

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for inkpic operations.
#[derive(Error, Debug)]
pub enum InkpicError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Unsupported or unrecognized image format
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Encoding the output bitmap failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Reading a source or writing a destination failed
    #[error("Filesystem error for {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Coarse classification of a pipeline failure, used in logs and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The source could not be decoded or is not a usable image
    Decode,
    /// The source could not be read or the destination could not be written
    Filesystem,
    /// The output bitmap could not be produced
    Processing,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Decode => write!(f, "decode"),
            ErrorKind::Filesystem => write!(f, "filesystem"),
            ErrorKind::Processing => write!(f, "processing"),
        }
    }
}

impl PipelineError {
    /// Classify this error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Decode { .. }
            | PipelineError::UnsupportedFormat { .. }
            | PipelineError::FileTooLarge { .. }
            | PipelineError::ImageTooLarge { .. } => ErrorKind::Decode,
            PipelineError::Filesystem { .. } | PipelineError::FileNotFound(_) => {
                ErrorKind::Filesystem
            }
            PipelineError::Encode { .. } => ErrorKind::Processing,
        }
    }
}

/// Convenience type alias for inkpic results.
pub type Result<T> = std::result::Result<T, InkpicError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
