//! Orientation normalization and mirroring.

use image::imageops;
use image::metadata::Orientation;
use image::{DynamicImage, RgbImage};

/// Apply an EXIF orientation so stored pixel order matches the intended view.
///
/// Consumes the decoded image and returns it as 8-bit RGB with no residual
/// orientation. `None` or an unknown value leaves the pixels as stored.
pub fn normalize_orientation(mut image: DynamicImage, orientation: Option<u8>) -> RgbImage {
    if let Some(orientation) = orientation.and_then(Orientation::from_exif) {
        image.apply_orientation(orientation);
    }
    image.into_rgb8()
}

/// Flip left-right. The frame shows every picture mirrored, so this is
/// unconditional.
pub fn mirror(image: &RgbImage) -> RgbImage {
    imageops::flip_horizontal(image)
}
