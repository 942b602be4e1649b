//! Output bitmap encoding.
//!
//! The frame firmware reads uncompressed Windows bitmaps with an indexed
//! colour table and takes each pixel byte as a palette index, so frames are
//! written at 8 bits per pixel with the 7 palette entries in index order.

use image::codecs::bmp::BmpEncoder;
use image::ExtendedColorType;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::palette::FramePalette;

use super::quantize::IndexedFrame;

/// Encode an indexed frame as an 8-bit paletted BMP.
pub fn encode_bmp(frame: &IndexedFrame, path: &Path) -> PipelineResult<Vec<u8>> {
    let palette = FramePalette.entries();
    let mut bytes = Vec::new();
    BmpEncoder::new(&mut bytes)
        .encode_with_palette(
            &frame.indices,
            frame.width,
            frame.height,
            ExtendedColorType::L8,
            Some(&palette[..]),
        )
        .map_err(|e| PipelineError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(bytes)
}

/// Encode `frame` and write it to `path`, replacing any existing file.
pub fn write_bmp(frame: &IndexedFrame, path: &Path) -> PipelineResult<()> {
    let bytes = encode_bmp(frame, path)?;
    std::fs::write(path, bytes).map_err(|e| PipelineError::Filesystem {
        path: path.to_path_buf(),
        source: e,
    })
}
