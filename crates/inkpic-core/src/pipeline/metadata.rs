//! EXIF orientation extraction.

use exif::{In, Reader, Tag, Value};
use std::io::Cursor;

/// Reads the EXIF fields the pipeline cares about.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Extract the EXIF orientation (1-8) from an encoded image.
    ///
    /// Returns `None` when the image has no EXIF block, the block is
    /// malformed, or the tag holds a value outside 1-8. All of these mean
    /// "no rotation needed".
    pub fn orientation(bytes: &[u8]) -> Option<u8> {
        let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => return None,
            Err(e) => {
                tracing::debug!("Ignoring unreadable EXIF data: {}", e);
                return None;
            }
        };

        let value = Self::get_u32(&exif, Tag::Orientation)?;
        match u8::try_from(value) {
            Ok(v @ 1..=8) => Some(v),
            _ => {
                tracing::debug!("Ignoring out-of-range EXIF orientation {}", value);
                None
            }
        }
    }

    /// Get a u32 field from EXIF data.
    fn get_u32(exif: &exif::Exif, tag: Tag) -> Option<u32> {
        exif.get_field(tag, In::PRIMARY)
            .and_then(|f| match &f.value {
                Value::Short(v) => v.first().map(|&x| x as u32),
                Value::Long(v) => v.first().copied(),
                _ => None,
            })
    }
}

/// Insert an APP1 segment carrying only an Orientation tag right after the
/// SOI marker of an encoded JPEG.
#[cfg(test)]
pub(crate) fn with_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
    let mut tiff = b"MM\x00\x2a\x00\x00\x00\x08".to_vec();
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x0112u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes()); // SHORT
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());

    let mut payload = b"Exif\x00\x00".to_vec();
    payload.extend_from_slice(&tiff);
    let length = (payload.len() + 2) as u16;

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn jpeg(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbImage::new(width, height)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
            .unwrap();
        bytes
    }

    #[test]
    fn test_orientation_from_exif_block() {
        let bytes = with_orientation(&jpeg(16, 8), 6);
        assert_eq!(MetadataExtractor::orientation(&bytes), Some(6));
    }

    #[test]
    fn test_out_of_range_orientation_is_ignored() {
        let bytes = with_orientation(&jpeg(16, 8), 99);
        assert_eq!(MetadataExtractor::orientation(&bytes), None);
        let bytes = with_orientation(&jpeg(16, 8), 0);
        assert_eq!(MetadataExtractor::orientation(&bytes), None);
    }

    #[test]
    fn test_orientation_without_exif() {
        assert_eq!(MetadataExtractor::orientation(b"BM not really a bitmap"), None);
    }

    #[test]
    fn test_orientation_of_empty_input() {
        assert_eq!(MetadataExtractor::orientation(&[]), None);
    }

    #[test]
    fn test_orientation_of_truncated_jpeg() {
        // SOI followed by the start of an APP1 segment that never finishes
        let bytes = [0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x40, b'E', b'x', b'i', b'f'];
        assert_eq!(MetadataExtractor::orientation(&bytes), None);
    }
}
