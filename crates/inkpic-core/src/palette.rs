//! The 7-color palette supported by the e-paper frame.
//!
//! The order of the colors is the pixel value the frame firmware expects, so
//! palette index `i` in an output bitmap always means `PaletteColor::ALL[i]`.

use image::imageops::ColorMap;
use image::Rgb;

/// Number of entries in the frame palette.
pub const PALETTE_SIZE: usize = 7;

/// A color the frame can display, in firmware order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    Black,
    White,
    Green,
    Blue,
    Red,
    Yellow,
    Orange,
}

impl PaletteColor {
    /// All palette colors, in index order.
    pub const ALL: [PaletteColor; PALETTE_SIZE] = [
        PaletteColor::Black,
        PaletteColor::White,
        PaletteColor::Green,
        PaletteColor::Blue,
        PaletteColor::Red,
        PaletteColor::Yellow,
        PaletteColor::Orange,
    ];

    /// The RGB value written to the bitmap color table.
    pub const fn rgb(self) -> Rgb<u8> {
        match self {
            PaletteColor::Black => Rgb([0, 0, 0]),
            PaletteColor::White => Rgb([255, 255, 255]),
            PaletteColor::Green => Rgb([0, 255, 0]),
            PaletteColor::Blue => Rgb([0, 0, 255]),
            PaletteColor::Red => Rgb([255, 0, 0]),
            PaletteColor::Yellow => Rgb([255, 255, 0]),
            PaletteColor::Orange => Rgb([255, 128, 0]),
        }
    }

    /// Position of this color in the palette.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Color at a palette position, if in range.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

fn color_distance_sq(a: &Rgb<u8>, b: &Rgb<u8>) -> i32 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(&x, &y)| (x as i32 - y as i32).pow(2))
        .sum()
}

/// The fixed frame palette, usable as an `image` color map for dithering.
#[derive(Debug, Clone, Copy, Default)]
pub struct FramePalette;

impl FramePalette {
    /// Closest palette color by squared RGB distance. Ties go to the lower index.
    pub fn nearest(&self, color: &Rgb<u8>) -> PaletteColor {
        let mut best = PaletteColor::Black;
        let mut best_distance = i32::MAX;
        for candidate in PaletteColor::ALL {
            let distance = color_distance_sq(color, &candidate.rgb());
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        best
    }

    /// Color table entries in index order, as the BMP encoder wants them.
    pub fn entries(&self) -> [[u8; 3]; PALETTE_SIZE] {
        PaletteColor::ALL.map(|c| c.rgb().0)
    }

    /// Whether `color` is exactly one of the palette colors.
    pub fn contains(&self, color: &Rgb<u8>) -> bool {
        PaletteColor::ALL.iter().any(|c| c.rgb() == *color)
    }
}

impl ColorMap for FramePalette {
    type Color = Rgb<u8>;

    fn index_of(&self, color: &Rgb<u8>) -> usize {
        self.nearest(color).index() as usize
    }

    fn lookup(&self, index: usize) -> Option<Rgb<u8>> {
        PaletteColor::ALL.get(index).map(|c| c.rgb())
    }

    fn has_lookup(&self) -> bool {
        true
    }

    fn map_color(&self, color: &mut Rgb<u8>) {
        *color = self.nearest(color).rgb();
    }
}
