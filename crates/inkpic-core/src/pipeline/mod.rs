//! Photo conversion pipeline components.
//!
//! This module contains all the stages of the conversion pipeline:
//! - **discovery**: Find source photos in directory trees
//! - **validate**: Pre-decode size and signature checks
//! - **decode**: Load and decode images
//! - **metadata**: Read the EXIF orientation
//! - **transform**: Orientation normalization and mirroring
//! - **enhance**: Auto-contrast and saturation boost
//! - **geometry**: Aspect-ratio crop and resize to the frame
//! - **quantize**: Reduction to the 7-colour palette
//! - **encode**: 8-bit paletted BMP output
//! - **processor**: Orchestrates the full pipeline

pub mod decode;
pub mod discovery;
pub mod encode;
pub mod enhance;
pub mod geometry;
pub mod metadata;
pub mod processor;
pub mod quantize;
pub mod transform;
pub mod validate;

// Re-exports for convenient access
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use encode::{encode_bmp, write_bmp};
pub use geometry::CropBox;
pub use metadata::MetadataExtractor;
pub use processor::{ImageProcessor, ProcessedFrame};
pub use quantize::{IndexedFrame, Quantizer};
pub use validate::Validator;
