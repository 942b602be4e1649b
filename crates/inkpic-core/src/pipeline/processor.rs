//! Pipeline orchestration - wires together all conversion stages.

use image::{ImageFormat, RgbImage};
use std::path::Path;
use std::time::Instant;

use crate::config::{Config, EnhanceConfig};
use crate::error::PipelineResult;
use crate::types::{ConvertedFile, FrameGeometry};

use super::decode::{format_to_string, ImageDecoder};
use super::discovery::{DiscoveredFile, FileDiscovery};
use super::encode::write_bmp;
use super::enhance::enhance;
use super::geometry::{crop_to_ratio, resize_to_frame};
use super::quantize::{IndexedFrame, Quantizer};
use super::transform::{mirror, normalize_orientation};
use super::validate::Validator;

/// A source photo taken through every stage, ready to be encoded.
#[derive(Debug, Clone)]
pub struct ProcessedFrame {
    /// The frame as palette indices
    pub frame: IndexedFrame,
    /// Detected source format
    pub format: ImageFormat,
    /// Source dimensions after orientation normalization
    pub source_width: u32,
    pub source_height: u32,
    /// EXIF orientation that was applied, if any
    pub orientation: Option<u8>,
}

/// The main image processor that orchestrates the full pipeline.
pub struct ImageProcessor {
    validator: Validator,
    decoder: ImageDecoder,
    discovery: FileDiscovery,
    enhance: EnhanceConfig,
    quantizer: Quantizer,
    geometry: FrameGeometry,
}

impl ImageProcessor {
    /// Create a new image processor with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            validator: Validator::new(config.limits.clone()),
            decoder: ImageDecoder::new(config.limits.clone()),
            discovery: FileDiscovery::new(&config.processing),
            enhance: config.enhance.clone(),
            quantizer: Quantizer::new(config.quantize.clone()),
            geometry: FrameGeometry::FRAME,
        }
    }

    /// Run one photo through validation, decoding and every transform stage.
    ///
    /// Stages run in a fixed order: orientation, mirror, auto-contrast and
    /// saturation, crop, resize, quantize.
    pub fn process(&self, path: &Path) -> PipelineResult<ProcessedFrame> {
        let start = Instant::now();
        tracing::debug!("Processing: {:?}", path);

        self.validator.validate(path)?;
        tracing::trace!("  Validate: {:?}", start.elapsed());

        let decode_start = Instant::now();
        let decoded = self.decoder.decode(path)?;
        tracing::trace!("  Decode: {:?}", decode_start.elapsed());

        let format = decoded.format;
        let orientation = decoded.orientation;

        let stage_start = Instant::now();
        let oriented = normalize_orientation(decoded.image, orientation);
        let (source_width, source_height) = oriented.dimensions();
        tracing::trace!("  Orientation: {:?}", stage_start.elapsed());

        let stage_start = Instant::now();
        let mirrored = mirror(&oriented);
        drop(oriented);
        tracing::trace!("  Mirror: {:?}", stage_start.elapsed());

        let stage_start = Instant::now();
        let enhanced = enhance(&mirrored, &self.enhance);
        drop(mirrored);
        tracing::trace!("  Enhance: {:?}", stage_start.elapsed());

        let stage_start = Instant::now();
        let cropped = crop_to_ratio(&enhanced, self.geometry);
        drop(enhanced);
        tracing::trace!("  Crop: {:?}", stage_start.elapsed());

        let stage_start = Instant::now();
        let resized = resize_to_frame(&cropped, self.geometry);
        drop(cropped);
        tracing::trace!("  Resize: {:?}", stage_start.elapsed());

        let stage_start = Instant::now();
        let frame = self.quantizer.quantize(&resized);
        tracing::trace!("  Quantize: {:?}", stage_start.elapsed());

        tracing::debug!(
            "Processed {:?} in {:?} ({} {}x{})",
            path.file_name().unwrap_or_default(),
            start.elapsed(),
            format_to_string(format),
            source_width,
            source_height
        );

        Ok(ProcessedFrame {
            frame,
            format,
            source_width,
            source_height,
            orientation,
        })
    }

    /// Process `source` and write the result to `destination`.
    pub fn convert(
        &self,
        source: &Path,
        destination: &Path,
        index: usize,
    ) -> PipelineResult<ConvertedFile> {
        let processed = self.process(source)?;

        let write_start = Instant::now();
        write_bmp(&processed.frame, destination)?;
        tracing::trace!("  Write: {:?}", write_start.elapsed());

        Ok(ConvertedFile {
            index,
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            source_width: processed.source_width,
            source_height: processed.source_height,
            orientation: processed.orientation,
        })
    }

    /// The reduced pipeline for synthetic frames: mirror, then quantize.
    ///
    /// Synthetic frames are already frame-sized and use saturated colours,
    /// so enhancement and geometry stages are skipped.
    pub fn mirror_and_quantize(&self, image: &RgbImage) -> IndexedFrame {
        self.quantizer.quantize(&mirror(image))
    }

    /// Discover all source photos under a directory.
    pub fn discover(&self, root: &Path) -> Vec<DiscoveredFile> {
        self.discovery.discover(root)
    }
}
