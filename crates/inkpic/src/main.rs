//! Inkpic CLI - convert photo collections for 7-colour e-paper picture frames.
//!
//! Inkpic walks a directory tree of photos, shuffles them, and writes each
//! one as an 800x480 palette bitmap named `pic_000.bmp`, `pic_001.bmp`, ...
//! ready to be copied onto the frame's SD card.
//!
//! # Usage
//!
//! ```bash
//! # Convert a photo library
//! inkpic convert --source ~/Pictures --dest /media/sdcard
//!
//! # Reproducible order with a report of which photo went where
//! inkpic convert --source ./photos --dest ./frame --seed 7 --report report.json
//!
//! # Numbered placeholders to check the frame's slideshow order
//! inkpic test-images --dest ./frame --count 50
//!
//! # View configuration
//! inkpic config show
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use inkpic_core::Config;
use std::path::{Path, PathBuf};

mod cli;
mod logging;

/// Inkpic - convert photo collections for 7-colour e-paper picture frames.
#[derive(Parser, Debug)]
#[command(name = "inkpic")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "INKPIC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a directory tree of photos into numbered frame bitmaps
    Convert(cli::convert::ConvertArgs),

    /// Generate numbered placeholder frames
    TestImages(cli::test_images::TestImagesArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config_path = cli
        .config
        .as_deref()
        .map(inkpic_core::config::expand_path)
        .unwrap_or_else(Config::default_path);
    let config = load_config(cli.config.is_some(), &config_path)?;
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Inkpic v{}", inkpic_core::VERSION);

    match cli.command {
        Commands::Convert(args) => cli::convert::execute(args, config),
        Commands::TestImages(args) => cli::test_images::execute(args, config),
        Commands::Config(args) => cli::config::execute(args, &config, &config_path),
    }
}

/// Load the config file.
///
/// An explicitly requested file must load. The default location may be
/// missing or broken, in which case defaults are used.
fn load_config(explicit: bool, path: &Path) -> anyhow::Result<Config> {
    if explicit {
        return Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    if !path.exists() {
        return Ok(Config::default());
    }
    match Config::load_from(path) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `inkpic config path`."
            );
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_defaults() {
        let cli = Cli::try_parse_from(["inkpic", "convert", "--source", "in", "--dest", "out"])
            .unwrap();
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.source, PathBuf::from("in"));
        assert!(!args.fail_fast);
        assert!(args.report.is_none());
        assert_eq!(args.report_format, cli::convert::ReportFormat::Json);
    }

    #[test]
    fn test_convert_requires_source_and_dest() {
        assert!(Cli::try_parse_from(["inkpic", "convert", "--dest", "out"]).is_err());
        assert!(Cli::try_parse_from(["inkpic", "convert", "--source", "in"]).is_err());
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["inkpic"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "inkpic",
            "test-images",
            "--dest",
            "out",
            "--count",
            "5",
            "-v",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        let Commands::TestImages(args) = cli.command else {
            panic!("expected test-images");
        };
        assert_eq!(args.count, Some(5));
    }

    #[test]
    fn test_load_config_explicit_missing_file_fails() {
        assert!(load_config(true, Path::new("/nonexistent/inkpic.toml")).is_err());
        assert!(load_config(false, Path::new("/nonexistent/inkpic.toml")).is_ok());
    }
}
