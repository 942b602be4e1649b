//! File discovery for finding source photos in a directory tree.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;

/// Filename suffixes accepted as source photos (compared case-insensitively).
pub const SUPPORTED_SUFFIXES: [&str; 4] = [".bmp", ".png", ".jpg", ".jpeg"];

/// Discovers source photos in directories.
pub struct FileDiscovery {
    follow_links: bool,
}

/// Information about a discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            follow_links: config.follow_links,
        }
    }

    /// Recursively find every supported photo under `root`.
    ///
    /// A root that does not exist yields an empty list. The result is sorted
    /// by path only so that a seeded shuffle is reproducible; callers must
    /// not rely on any particular order.
    pub fn discover(&self, root: &Path) -> Vec<DiscoveredFile> {
        let root = match std::fs::canonicalize(root) {
            Ok(root) => root,
            Err(e) => {
                tracing::warn!("Source directory {:?} is not accessible: {}", root, e);
                return vec![];
            }
        };

        let mut files = Vec::new();

        for entry in WalkDir::new(&root).follow_links(self.follow_links) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if !is_supported_name(name) {
                continue;
            }
            match entry.metadata() {
                Ok(meta) => files.push(DiscoveredFile {
                    path: entry.path().to_path_buf(),
                    size: meta.len(),
                }),
                Err(e) => tracing::debug!("Skipping {:?}: {}", entry.path(), e),
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }

    /// Get total size of all discovered files.
    pub fn total_size(files: &[DiscoveredFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}

/// Whether a bare filename names a supported photo.
///
/// The name must end in one of [`SUPPORTED_SUFFIXES`] (any case) and
/// everything before the suffix must be non-empty and made of
/// [`is_name_char`] characters.
pub fn is_supported_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    SUPPORTED_SUFFIXES.iter().any(|suffix| {
        lower.ends_with(suffix) && {
            let stem = &name[..name.len() - suffix.len()];
            !stem.is_empty() && stem.chars().all(is_name_char)
        }
    })
}

/// Characters allowed before the suffix: ASCII letters and digits,
/// whitespace, and `_ \ . - ( ) :`.
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '_' | '\\' | '.' | '-' | '(' | ')' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_name() {
        assert!(is_supported_name("IMG_20130702_134515.jpg"));
        assert!(is_supported_name("DSCN6796.JPG"));
        assert!(is_supported_name("scan.jpeg"));
        assert!(is_supported_name("Scan.JpEg"));
        assert!(is_supported_name("drawing.png"));
        assert!(is_supported_name("old.bmp"));
        assert!(is_supported_name("Holiday (2) - beach.jpg"));
        assert!(is_supported_name("a.b.c.png"));
        assert!(!is_supported_name("notes.txt"));
        assert!(!is_supported_name("photo.jpg.txt"));
        assert!(!is_supported_name("photo.webp"));
    }

    #[test]
    fn test_suffix_must_terminate_name() {
        assert!(!is_supported_name("photo.jpgx"));
        assert!(!is_supported_name("photo.png.bak"));
        assert!(!is_supported_name("photojpg"));
    }

    #[test]
    fn test_stem_must_be_nonempty() {
        assert!(!is_supported_name(".jpg"));
        assert!(!is_supported_name(".JPEG"));
        assert!(is_supported_name("..jpg"));
    }

    #[test]
    fn test_stem_character_class() {
        assert!(!is_supported_name("café.jpg"));
        assert!(!is_supported_name("photo#1.jpg"));
        assert!(!is_supported_name("50%.png"));
        assert!(is_supported_name("C:\\photo.jpg"));
    }

    #[test]
    fn test_missing_root_yields_empty() {
        let discovery = FileDiscovery::new(&ProcessingConfig::default());
        let files = discovery.discover(Path::new("/nonexistent/inkpic/source"));
        assert!(files.is_empty());
    }

    #[test]
    fn test_total_size() {
        let files = vec![
            DiscoveredFile {
                path: PathBuf::from("a.jpg"),
                size: 100,
            },
            DiscoveredFile {
                path: PathBuf::from("b.jpg"),
                size: 200,
            },
        ];

        assert_eq!(FileDiscovery::total_size(&files), 300);
    }
}
