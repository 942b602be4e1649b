//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

/// Largest cluster count the quantizer accepts (one byte per cluster index).
pub const MAX_KMEANS_CLUSTERS: usize = 256;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.enhance.autocontrast_cutoff >= 50 {
            return Err(ConfigError::ValidationError(
                "enhance.autocontrast_cutoff must be below 50".into(),
            ));
        }
        if !self.enhance.saturation.is_finite() || self.enhance.saturation < 0.0 {
            return Err(ConfigError::ValidationError(
                "enhance.saturation must be a finite value >= 0.0".into(),
            ));
        }
        if self.quantize.kmeans_clusters > MAX_KMEANS_CLUSTERS {
            return Err(ConfigError::ValidationError(format!(
                "quantize.kmeans_clusters must be <= {MAX_KMEANS_CLUSTERS}"
            )));
        }
        if self.quantize.kmeans_clusters > 0 && self.quantize.kmeans_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "quantize.kmeans_iterations must be > 0 when clustering is enabled".into(),
            ));
        }
        if self.test_images.count == 0 {
            return Err(ConfigError::ValidationError(
                "test_images.count must be > 0".into(),
            ));
        }
        Ok(())
    }
}
