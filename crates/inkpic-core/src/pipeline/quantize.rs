//! Reduction of a full-colour frame to the 7-colour panel palette.
//!
//! Quantization runs in up to three steps:
//! 1. Optional k-means clustering, which flattens noise into a small set of
//!    representative colours before the palette is applied
//! 2. Floyd-Steinberg error diffusion against the palette
//! 3. Mapping every pixel to its palette index

use image::imageops;
use image::{Rgb, RgbImage};
use std::collections::HashSet;

use crate::config::QuantizeConfig;
use crate::palette::{FramePalette, PaletteColor};

/// An image expressed as palette indices, row-major from the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFrame {
    pub width: u32,
    pub height: u32,
    pub indices: Vec<u8>,
}

impl IndexedFrame {
    /// Palette index of the pixel at (x, y).
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.indices[(y * self.width + x) as usize]
    }

    /// Palette colour of the pixel at (x, y).
    pub fn color_at(&self, x: u32, y: u32) -> Option<PaletteColor> {
        PaletteColor::from_index(self.index_at(x, y))
    }

    /// Expand the indices back to RGB using the palette.
    pub fn to_rgb(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            self.color_at(x, y)
                .map(PaletteColor::rgb)
                .unwrap_or(Rgb([0, 0, 0]))
        })
    }
}

/// Palette quantizer.
pub struct Quantizer {
    config: QuantizeConfig,
}

impl Quantizer {
    pub fn new(config: QuantizeConfig) -> Self {
        Self { config }
    }

    /// Reduce `image` to palette indices.
    pub fn quantize(&self, image: &RgbImage) -> IndexedFrame {
        let mut working = if self.config.kmeans_clusters > 0 {
            cluster_colors(
                image,
                self.config.kmeans_clusters,
                self.config.kmeans_iterations,
            )
        } else {
            image.clone()
        };

        if self.config.dither {
            imageops::dither(&mut working, &FramePalette);
        }

        let indexed = imageops::index_colors(&working, &FramePalette);
        IndexedFrame {
            width: indexed.width(),
            height: indexed.height(),
            indices: indexed.into_raw(),
        }
    }
}

/// Replace every pixel with the centroid of its k-means cluster.
///
/// Centroids start at `k` evenly spaced pixels so the result is
/// deterministic. Images with at most `k` distinct colours, and calls with
/// no iterations to run, return the image unchanged.
pub fn cluster_colors(image: &RgbImage, k: usize, max_iterations: usize) -> RgbImage {
    if k == 0 || max_iterations == 0 {
        return image.clone();
    }
    let pixels: Vec<[u8; 3]> = image.pixels().map(|p| p.0).collect();
    if has_at_most_colors(&pixels, k) {
        return image.clone();
    }

    let mut centroids: Vec<[f32; 3]> = (0..k)
        .map(|i| to_f32(pixels[i * pixels.len() / k]))
        .collect();
    let mut assignments = vec![0usize; pixels.len()];

    for iteration in 0..max_iterations {
        let mut changed = iteration == 0;
        for (pixel, assignment) in pixels.iter().zip(assignments.iter_mut()) {
            let nearest = nearest_centroid(&centroids, to_f32(*pixel));
            if nearest != *assignment {
                *assignment = nearest;
                changed = true;
            }
        }
        if !changed {
            tracing::trace!(iteration, "k-means converged");
            break;
        }

        let mut sums = vec![[0f64; 3]; k];
        let mut counts = vec![0usize; k];
        for (pixel, &cluster) in pixels.iter().zip(&assignments) {
            for channel in 0..3 {
                sums[cluster][channel] += pixel[channel] as f64;
            }
            counts[cluster] += 1;
        }
        for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
            // Empty clusters keep their previous centroid
            if count > 0 {
                *centroid = sum.map(|s| (s / count as f64) as f32);
            }
        }
    }

    let palette: Vec<Rgb<u8>> = centroids
        .iter()
        .map(|c| Rgb(c.map(|v| v.round().clamp(0.0, 255.0) as u8)))
        .collect();
    let mut out = RgbImage::new(image.width(), image.height());
    for (dst, &cluster) in out.pixels_mut().zip(&assignments) {
        *dst = palette[cluster];
    }
    out
}

fn has_at_most_colors(pixels: &[[u8; 3]], limit: usize) -> bool {
    let mut seen = HashSet::new();
    for pixel in pixels {
        if seen.insert(*pixel) && seen.len() > limit {
            return false;
        }
    }
    true
}

fn to_f32(pixel: [u8; 3]) -> [f32; 3] {
    pixel.map(|v| v as f32)
}

fn nearest_centroid(centroids: &[[f32; 3]], color: [f32; 3]) -> usize {
    let mut best = 0;
    let mut best_distance = f32::MAX;
    for (i, centroid) in centroids.iter().enumerate() {
        let distance: f32 = centroid
            .iter()
            .zip(color.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best
}
