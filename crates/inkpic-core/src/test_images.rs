//! Numbered placeholder frames for checking a frame's slideshow order.
//!
//! Each image is a solid background with its index drawn in large digits at a
//! random position, in one of a fixed set of legible colour pairs.

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

use crate::batch::dest_pic_filename;
use crate::error::{PipelineError, Result};
use crate::palette::PaletteColor;
use crate::pipeline::{write_bmp, ImageProcessor};
use crate::types::FrameGeometry;

/// Foreground/background pairs that stay readable on the panel.
pub const COLOR_COMBOS: [(PaletteColor, PaletteColor); 12] = [
    (PaletteColor::Black, PaletteColor::White),
    (PaletteColor::White, PaletteColor::Black),
    (PaletteColor::Blue, PaletteColor::Yellow),
    (PaletteColor::Yellow, PaletteColor::Blue),
    (PaletteColor::Red, PaletteColor::White),
    (PaletteColor::White, PaletteColor::Red),
    (PaletteColor::Orange, PaletteColor::Black),
    (PaletteColor::Black, PaletteColor::Orange),
    (PaletteColor::Green, PaletteColor::Black),
    (PaletteColor::Green, PaletteColor::White),
    (PaletteColor::Black, PaletteColor::Green),
    (PaletteColor::White, PaletteColor::Green),
];

/// Each font pixel becomes a `GLYPH_SCALE` x `GLYPH_SCALE` block.
pub const GLYPH_SCALE: u32 = 16;
/// Rendered glyph height in pixels.
pub const GLYPH_HEIGHT: u32 = 7 * GLYPH_SCALE;
/// Horizontal distance between the left edges of adjacent glyphs.
pub const GLYPH_ADVANCE: u32 = 6 * GLYPH_SCALE;

// Exclusive bound for the left edge of a label
const MAX_LABEL_X: u32 = 400;

/// 5x7 digit bitmaps, one row per entry, bit 4 is the leftmost column.
fn digit_rows(digit: char) -> Option<[u8; 7]> {
    let rows = match digit {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b01110, 0b10000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00001, 0b01110],
        _ => return None,
    };
    Some(rows)
}

/// Draw `text` with its top-left corner at (x, y). Pixels falling outside
/// the image are clipped; characters other than digits are skipped.
pub fn draw_label(image: &mut RgbImage, x: u32, y: u32, text: &str, color: Rgb<u8>) {
    let (width, height) = image.dimensions();
    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = digit_rows(ch) else {
            continue;
        };
        let glyph_x = x + i as u32 * GLYPH_ADVANCE;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..5u32 {
                if bits & (1 << (4 - col)) == 0 {
                    continue;
                }
                let left = glyph_x + col * GLYPH_SCALE;
                let top = y + row as u32 * GLYPH_SCALE;
                for py in top..(top + GLYPH_SCALE).min(height) {
                    for px in left..(left + GLYPH_SCALE).min(width) {
                        image.put_pixel(px, py, color);
                    }
                }
            }
        }
    }
}

/// Generates numbered placeholder frames.
pub struct TestImageGenerator<R: Rng> {
    rng: R,
    geometry: FrameGeometry,
}

impl TestImageGenerator<StdRng> {
    /// Seeded generator for reproducible output, or an entropy-seeded one.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(StdRng::seed_from_u64(seed)),
            None => Self::new(StdRng::from_entropy()),
        }
    }
}

impl<R: Rng> TestImageGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            geometry: FrameGeometry::FRAME,
        }
    }

    /// Render one frame-sized image labelled with `text`.
    pub fn create_test_image(&mut self, text: &str) -> RgbImage {
        let (fg, bg) = COLOR_COMBOS[self.rng.gen_range(0..COLOR_COMBOS.len())];
        let x = self.rng.gen_range(0..MAX_LABEL_X);
        let y = self
            .rng
            .gen_range(0..self.geometry.height.saturating_sub(2 * GLYPH_HEIGHT).max(1));

        let mut image = RgbImage::from_pixel(self.geometry.width, self.geometry.height, bg.rgb());
        draw_label(&mut image, x, y, text, fg.rgb());
        image
    }

    /// Write `count` numbered frames into `dest_dir` as `pic_NNN.bmp`.
    ///
    /// Each frame goes through the mirror and quantize stages only.
    /// `on_progress` is called with the index of every written frame.
    pub fn generate<F>(
        &mut self,
        dest_dir: &Path,
        count: usize,
        processor: &ImageProcessor,
        mut on_progress: F,
    ) -> Result<usize>
    where
        F: FnMut(usize),
    {
        std::fs::create_dir_all(dest_dir).map_err(|e| PipelineError::Filesystem {
            path: dest_dir.to_path_buf(),
            source: e,
        })?;
        tracing::info!("Generating {} test images into {:?}", count, dest_dir);

        for index in 0..count {
            let image = self.create_test_image(&index.to_string());
            let frame = processor.mirror_and_quantize(&image);
            let path = dest_dir.join(dest_pic_filename(index));
            write_bmp(&frame, &path)?;
            tracing::debug!("Wrote {:?}", path);
            on_progress(index);
        }

        Ok(count)
    }
}
