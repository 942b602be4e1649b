//! The `inkpic test-images` command: numbered placeholder frames.

use clap::Args;
use indicatif::ProgressBar;
use inkpic_core::{Config, ImageProcessor, TestImageGenerator};
use std::path::PathBuf;

/// Arguments for the `test-images` command.
#[derive(Args, Debug)]
pub struct TestImagesArgs {
    /// Directory the numbered bitmaps are written to (created if missing)
    #[arg(long)]
    pub dest: PathBuf,

    /// Number of images to generate [default: test_images.count from config]
    #[arg(long)]
    pub count: Option<usize>,

    /// Seed for the colour and position choices
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Execute the test-images command.
pub fn execute(args: TestImagesArgs, config: Config) -> anyhow::Result<()> {
    let count = args.count.unwrap_or(config.test_images.count);
    if count == 0 {
        anyhow::bail!("--count must be at least 1");
    }

    let processor = ImageProcessor::new(&config);
    let mut generator = TestImageGenerator::from_seed(args.seed);
    let progress = ProgressBar::new(count as u64);

    let written = generator.generate(&args.dest, count, &processor, |_| progress.inc(1))?;
    progress.finish_and_clear();

    println!("Wrote {} test images to {}", written, args.dest.display());
    Ok(())
}
