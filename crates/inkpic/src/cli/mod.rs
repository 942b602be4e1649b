//! Subcommand implementations.

pub mod config;
pub mod convert;
pub mod test_images;
