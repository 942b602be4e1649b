//! Contrast and saturation enhancement.
//!
//! The panel has a narrow dynamic range and palette quantization washes out
//! colour, so every photo is stretched and oversaturated before cropping.

use image::{Rgb, RgbImage};

use crate::config::EnhanceConfig;

/// Per-channel histogram stretch after discarding outliers.
///
/// For each channel, `cutoff` percent of the samples are discarded from the
/// dark end and from the light end (the count is `n * cutoff / 100`, rounded
/// down), and the remaining range is stretched to 0-255. Samples equal to
/// `ignore` are left out of the histogram. A channel whose remaining range
/// is empty or a single value is left unchanged.
pub fn autocontrast(image: &RgbImage, cutoff: u8, ignore: Option<u8>) -> RgbImage {
    let mut histograms = [[0u64; 256]; 3];
    for pixel in image.pixels() {
        for (channel, &value) in pixel.0.iter().enumerate() {
            histograms[channel][value as usize] += 1;
        }
    }

    let luts = histograms.map(|mut histogram| {
        if let Some(ignore) = ignore {
            histogram[ignore as usize] = 0;
        }
        channel_lut(&mut histogram, cutoff)
    });

    let mut out = RgbImage::new(image.width(), image.height());
    for (src, dst) in image.pixels().zip(out.pixels_mut()) {
        *dst = Rgb([
            luts[0][src[0] as usize],
            luts[1][src[1] as usize],
            luts[2][src[2] as usize],
        ]);
    }
    out
}

fn channel_lut(histogram: &mut [u64; 256], cutoff: u8) -> [u8; 256] {
    let total: u64 = histogram.iter().sum();
    let cut = total * cutoff as u64 / 100;
    trim(histogram.iter_mut(), cut);
    trim(histogram.iter_mut().rev(), cut);

    let lo = histogram.iter().position(|&count| count > 0);
    let hi = histogram.iter().rposition(|&count| count > 0);

    let mut lut = [0u8; 256];
    match (lo, hi) {
        (Some(lo), Some(hi)) if hi > lo => {
            let scale = 255.0 / (hi - lo) as f64;
            let offset = -(lo as f64) * scale;
            for (value, entry) in lut.iter_mut().enumerate() {
                let mapped = (value as f64 * scale + offset).trunc();
                *entry = mapped.clamp(0.0, 255.0) as u8;
            }
        }
        _ => {
            for (value, entry) in lut.iter_mut().enumerate() {
                *entry = value as u8;
            }
        }
    }
    lut
}

/// Remove `cut` samples from the bins in iteration order.
fn trim<'a>(bins: impl Iterator<Item = &'a mut u64>, mut cut: u64) {
    for count in bins {
        if cut == 0 {
            break;
        }
        let removed = cut.min(*count);
        *count -= removed;
        cut -= removed;
    }
}

/// Scale saturation relative to each pixel's grayscale value.
///
/// `factor` 1.0 is the identity, 0.0 yields grayscale, above 1.0 pushes every
/// channel away from gray. Results are truncated and clamped to 0-255.
pub fn saturate(image: &RgbImage, factor: f32) -> RgbImage {
    let mut out = RgbImage::new(image.width(), image.height());
    for (src, dst) in image.pixels().zip(out.pixels_mut()) {
        let gray = luma(src) as f32;
        *dst = Rgb(src.0.map(|c| {
            let value = gray + factor * (c as f32 - gray);
            if value <= 0.0 {
                0
            } else if value >= 255.0 {
                255
            } else {
                value as u8
            }
        }));
    }
    out
}

/// ITU-R 601 luma in 16-bit fixed point, rounded.
fn luma(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Auto-contrast followed by the saturation boost, as configured.
pub fn enhance(image: &RgbImage, config: &EnhanceConfig) -> RgbImage {
    let contrasted = autocontrast(image, config.autocontrast_cutoff, config.autocontrast_ignore);
    saturate(&contrasted, config.saturation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32) -> RgbImage {
        // Horizontal ramp starting at 50 in every channel
        RgbImage::from_fn(width, 1, |x, _| {
            let v = (50 + x) as u8;
            Rgb([v, v, v])
        })
    }

    #[test]
    fn test_autocontrast_stretches_range() {
        // 50..=101 spans 51 levels, so the scale is exactly 5
        let out = autocontrast(&gradient(52), 0, None);
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(10, 0), &Rgb([50, 50, 50]));
        assert_eq!(out.get_pixel(51, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_autocontrast_cutoff_discards_outliers() {
        // 98 pixels at 50, 100 at 101, one dark and one light outlier
        let image = RgbImage::from_fn(200, 1, |x, _| {
            let v = match x {
                0 => 10,
                1..=98 => 50,
                199 => 250,
                _ => 101,
            };
            Rgb([v, v, v])
        });

        // cut = 200 * 2 / 100 = 4 samples from each end, which removes both
        // outliers and leaves 50..=101 as the stretched range
        let out = autocontrast(&image, 2, None);
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(100, 0), &Rgb([255, 255, 255]));
        assert_eq!(out.get_pixel(199, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_autocontrast_flat_channel_unchanged() {
        let image = RgbImage::from_pixel(10, 10, Rgb([40, 90, 200]));
        let out = autocontrast(&image, 2, Some(2));
        assert_eq!(out, image);
    }

    #[test]
    fn test_autocontrast_ignores_value() {
        // Only values 2 and 53 present; ignoring 2 leaves a single value
        let mut image = RgbImage::from_pixel(2, 1, Rgb([2, 2, 2]));
        image.put_pixel(1, 0, Rgb([53, 53, 53]));
        let out = autocontrast(&image, 0, Some(2));
        assert_eq!(out, image);

        let stretched = autocontrast(&image, 0, None);
        assert_eq!(stretched.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(stretched.get_pixel(1, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_trim_removes_from_front() {
        let mut bins = [1u64, 3, 5];
        trim(bins.iter_mut(), 2);
        assert_eq!(bins, [0, 2, 5]);

        let mut bins = [1u64, 3, 5];
        trim(bins.iter_mut().rev(), 6);
        assert_eq!(bins, [1, 2, 0]);
    }

    #[test]
    fn test_saturate_identity_and_gray() {
        let image = RgbImage::from_pixel(2, 2, Rgb([200, 100, 50]));
        assert_eq!(saturate(&image, 1.0), image);

        let gray = saturate(&image, 0.0);
        let g = luma(&Rgb([200, 100, 50]));
        assert_eq!(gray.get_pixel(0, 0), &Rgb([g, g, g]));
    }

    #[test]
    fn test_saturate_boost_clamps() {
        let image = RgbImage::from_pixel(1, 1, Rgb([200, 100, 50]));
        let out = saturate(&image, 2.5);
        // luma = 124; 124 + 2.5 * (c - 124)
        assert_eq!(luma(&Rgb([200, 100, 50])), 124);
        assert_eq!(out.get_pixel(0, 0), &Rgb([255, 64, 0]));
    }

    #[test]
    fn test_saturate_leaves_gray_alone() {
        let image = RgbImage::from_pixel(1, 1, Rgb([77, 77, 77]));
        assert_eq!(saturate(&image, 2.5), image);
    }

    #[test]
    fn test_enhance_preserves_dimensions() {
        let image = gradient(64);
        let out = enhance(&image, &EnhanceConfig::default());
        assert_eq!(out.dimensions(), image.dimensions());
    }
}
