//! Sub-configuration structs with defaults tuned for the 7-colour panel.

use serde::{Deserialize, Serialize};

/// Batch processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Abort the whole batch on the first failing file instead of skipping it
    pub fail_fast: bool,

    /// Follow symbolic links while walking the source tree
    pub follow_links: bool,

    /// Fixed shuffle seed; unset means a fresh random order on every run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            follow_links: true,
            seed: None,
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 20000,
        }
    }
}

/// Contrast and saturation enhancement applied before cropping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Percent of samples discarded at each end of every channel histogram
    pub autocontrast_cutoff: u8,

    /// Channel value excluded from the auto-contrast histogram
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocontrast_ignore: Option<u8>,

    /// Saturation factor relative to the grayscale equivalent
    pub saturation: f32,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            autocontrast_cutoff: 2,
            autocontrast_ignore: Some(2),
            saturation: 2.5,
        }
    }
}

/// Palette quantization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantizeConfig {
    /// Colour clusters computed before the palette reduction (0 disables clustering)
    pub kmeans_clusters: usize,

    /// Maximum k-means refinement passes
    pub kmeans_iterations: usize,

    /// Floyd-Steinberg error diffusion; when false pixels snap to the nearest colour
    pub dither: bool,
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self {
            kmeans_clusters: 16,
            kmeans_iterations: 8,
            dither: true,
        }
    }
}

/// Placeholder image generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TestImagesConfig {
    /// Number of images generated when `--count` is not given
    pub count: usize,
}

impl Default for TestImagesConfig {
    fn default() -> Self {
        Self { count: 600 }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
