//! Aspect-ratio cropping and resizing to the frame geometry.

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::types::FrameGeometry;

/// Pixel rectangle kept by the aspect-ratio crop, edges exclusive on the
/// right and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Centered box with the frame's aspect ratio, or `None` when the image
/// already has it.
///
/// Images wider than the frame lose columns on both sides, narrower ones
/// lose rows at the top and bottom. Fractional edges are rounded half to
/// even, and the box is never narrower than one pixel. Empty images are
/// left alone.
pub fn crop_box(width: u32, height: u32, frame: FrameGeometry) -> Option<CropBox> {
    if width == 0 || height == 0 {
        return None;
    }
    let (w, h) = (width as f64, height as f64);
    let ratio = w / h;
    let target = frame.aspect_ratio();

    if ratio > target {
        let new_width = target * h;
        let left = (w - new_width) / 2.0;
        let (left, right) = round_span(left, left + new_width, width);
        Some(CropBox {
            left,
            top: 0,
            right,
            bottom: height,
        })
    } else if ratio < target {
        let new_height = frame.height as f64 / frame.width as f64 * w;
        let top = (h - new_height) / 2.0;
        let (top, bottom) = round_span(top, top + new_height, height);
        Some(CropBox {
            left: 0,
            top,
            right: width,
            bottom,
        })
    } else {
        None
    }
}

fn round_span(start: f64, end: f64, limit: u32) -> (u32, u32) {
    let start = (start.round_ties_even().max(0.0) as u32).min(limit.saturating_sub(1));
    let end = (end.round_ties_even() as u32).clamp(start + 1, limit);
    (start, end)
}

/// Crop to the frame's aspect ratio. Images already at that ratio are
/// returned as a copy.
pub fn crop_to_ratio(image: &RgbImage, frame: FrameGeometry) -> RgbImage {
    match crop_box(image.width(), image.height(), frame) {
        Some(b) => imageops::crop_imm(image, b.left, b.top, b.width(), b.height()).to_image(),
        None => image.clone(),
    }
}

/// Stretch to exactly the frame dimensions with a bicubic filter.
pub fn resize_to_frame(image: &RgbImage, frame: FrameGeometry) -> RgbImage {
    imageops::resize(image, frame.width, frame.height, FilterType::CatmullRom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const FRAME: FrameGeometry = FrameGeometry::FRAME;

    #[test]
    fn test_portrait_crops_rows() {
        let b = crop_box(1536, 2048, FRAME).unwrap();
        assert_eq!((b.left, b.right), (0, 1536));
        assert_eq!((b.top, b.bottom), (563, 1485));
        assert_eq!((b.width(), b.height()), (1536, 922));
    }

    #[test]
    fn test_four_by_three_crops_rows() {
        let b = crop_box(2048, 1536, FRAME).unwrap();
        assert_eq!((b.top, b.bottom), (154, 1382));
        assert_eq!((b.width(), b.height()), (2048, 1228));
    }

    #[test]
    fn test_panorama_crops_columns() {
        let b = crop_box(1000, 300, FRAME).unwrap();
        assert_eq!((b.left, b.right), (250, 750));
        assert_eq!((b.width(), b.height()), (500, 300));
    }

    #[test]
    fn test_matching_ratio_is_not_cropped() {
        assert_eq!(crop_box(800, 480, FRAME), None);
        assert_eq!(crop_box(1600, 960, FRAME), None);
    }

    #[test]
    fn test_degenerate_sizes_keep_a_pixel() {
        let b = crop_box(1, 1000, FRAME).unwrap();
        assert_eq!(b.width(), 1);
        assert!(b.height() >= 1);

        let b = crop_box(1000, 1, FRAME).unwrap();
        assert_eq!(b.height(), 1);
        assert!(b.width() >= 1);
    }

    #[test]
    fn test_crop_keeps_center() {
        // Tall image with a red band in the middle third
        let image = RgbImage::from_fn(30, 90, |_, y| {
            if (30..60).contains(&y) {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        let cropped = crop_to_ratio(&image, FRAME);
        assert_eq!(cropped.dimensions(), (30, 18));
        assert!(cropped.pixels().all(|p| *p == Rgb([255, 0, 0])));
    }

    #[test]
    fn test_resize_always_hits_frame() {
        for (w, h) in [(10, 6), (1536, 922), (3, 700)] {
            let resized = resize_to_frame(&RgbImage::new(w, h), FRAME);
            assert_eq!(resized.dimensions(), (800, 480));
        }
    }
}
