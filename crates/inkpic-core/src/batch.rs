//! Batch orchestration: shuffle the manifest, assign output names, and drive
//! every file through the pipeline in turn.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::pipeline::{DiscoveredFile, ImageProcessor};
use crate::types::{BatchSummary, FailedFile, FileOutcome};

/// Output filename for the frame at `index`: `pic_000.bmp`, `pic_001.bmp`, ...
///
/// Indices of 1000 and above get as many digits as they need.
pub fn dest_pic_filename(index: usize) -> String {
    format!("pic_{index:03}.bmp")
}

/// Converts a manifest of source photos into numbered frame bitmaps.
pub struct BatchConverter<R: Rng> {
    processor: ImageProcessor,
    rng: R,
    fail_fast: bool,
}

impl BatchConverter<StdRng> {
    /// Build a converter from configuration.
    ///
    /// A configured seed gives a reproducible order; otherwise the order is
    /// drawn from OS entropy.
    pub fn from_config(config: &Config) -> Self {
        let rng = match config.processing.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(ImageProcessor::new(config), rng).fail_fast(config.processing.fail_fast)
    }
}

impl<R: Rng> BatchConverter<R> {
    pub fn new(processor: ImageProcessor, rng: R) -> Self {
        Self {
            processor,
            rng,
            fail_fast: false,
        }
    }

    /// Abort on the first failing file instead of skipping it.
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn processor(&self) -> &ImageProcessor {
        &self.processor
    }

    /// Uniformly permute the manifest.
    pub fn shuffle(&mut self, mut files: Vec<DiscoveredFile>) -> Vec<DiscoveredFile> {
        files.shuffle(&mut self.rng);
        files
    }

    /// Shuffle `files` and convert each into `dest_dir`.
    ///
    /// Successful files are numbered densely from zero in shuffled order.
    /// A failing file is logged and recorded, and the next success takes the
    /// index it would have used. With fail-fast enabled the first failure is
    /// returned as an error instead; files already written stay on disk.
    pub fn run<F>(
        &mut self,
        files: Vec<DiscoveredFile>,
        dest_dir: &Path,
        mut on_progress: F,
    ) -> Result<BatchSummary>
    where
        F: FnMut(&FileOutcome),
    {
        let start = Instant::now();
        std::fs::create_dir_all(dest_dir).map_err(|e| PipelineError::Filesystem {
            path: dest_dir.to_path_buf(),
            source: e,
        })?;

        let files = self.shuffle(files);
        tracing::info!("Converting {} files into {:?}", files.len(), dest_dir);

        let mut summary = BatchSummary::default();
        for file in files {
            let index = summary.succeeded();
            let destination = dest_dir.join(dest_pic_filename(index));

            let outcome = match self.processor.convert(&file.path, &destination, index) {
                Ok(converted) => {
                    tracing::debug!("{:?} -> {:?}", converted.source, converted.destination);
                    FileOutcome::Converted(converted)
                }
                Err(e) => {
                    tracing::error!(
                        path = %file.path.display(),
                        kind = %e.kind(),
                        "Failed to convert: {}",
                        e
                    );
                    if self.fail_fast {
                        return Err(e.into());
                    }
                    FileOutcome::Failed(FailedFile::new(file.path.clone(), &e))
                }
            };

            on_progress(&outcome);
            summary.record(outcome);
        }

        summary.total_seconds = start.elapsed().as_secs_f64();
        tracing::info!(
            "Converted {} files, {} failed, in {:.1}s",
            summary.succeeded(),
            summary.failed.len(),
            summary.total_seconds
        );
        Ok(summary)
    }
}
