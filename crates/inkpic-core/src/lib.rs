//! Inkpic Core - photo conversion for 7-colour e-paper frames.
//!
//! Inkpic turns a directory tree of photos into a flat set of numbered
//! bitmaps that an 800x480 seven-colour e-paper frame can show directly.
//!
//! # Architecture
//!
//! Each file runs through a fixed, sequential pipeline:
//!
//! ```text
//! Discover → Shuffle → Decode → Orient → Mirror → Enhance → Crop → Resize → Quantize → BMP
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use inkpic_core::{BatchConverter, Config};
//! use std::path::Path;
//!
//! fn main() -> inkpic_core::Result<()> {
//!     let config = Config::load()?;
//!     let mut converter = BatchConverter::from_config(&config);
//!
//!     let files = converter.processor().discover(Path::new("./photos"));
//!     let summary = converter.run(files, Path::new("./frame"), |_| {})?;
//!     println!("Converted {} photos", summary.succeeded());
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod output;
pub mod palette;
pub mod pipeline;
pub mod test_images;
pub mod types;

// Re-exports for convenient access
pub use batch::{dest_pic_filename, BatchConverter};
pub use config::Config;
pub use error::{ConfigError, ErrorKind, InkpicError, PipelineError, PipelineResult, Result};
pub use output::{OutputFormat, OutputWriter};
pub use palette::{FramePalette, PaletteColor, PALETTE_SIZE};
pub use pipeline::{DiscoveredFile, ImageProcessor, IndexedFrame, ProcessedFrame};
pub use test_images::TestImageGenerator;
pub use types::{BatchSummary, ConvertedFile, FailedFile, FileOutcome, FrameGeometry};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
