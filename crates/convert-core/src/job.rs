//! Data model for a conversion run.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A page image discovered under the extraction directory.
/// Immutable once collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Absolute path of the image file.
    pub path: PathBuf,
    /// Directory owning the file; pages sort by this first.
    pub dir: PathBuf,
    /// Base filename without extension; pages sort by this within a directory.
    pub stem: String,
    /// File extension, lowercased.
    pub ext: String,
}

impl ImageEntry {
    /// Build an entry from a file path. Returns `None` for paths without a
    /// representable stem or extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let dir = path.parent()?.to_path_buf();
        let stem = path.file_stem()?.to_str()?.to_string();
        let ext = path.extension()?.to_str()?.to_lowercase();
        Some(Self {
            path: path.to_path_buf(),
            dir,
            stem,
            ext,
        })
    }

    /// Original base filename, extension included.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub output_path: PathBuf,
    pub size_bytes: u64,
}

/// A completed conversion as the history store records it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub epub_name: String,
    pub display_name: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub download_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_entry_from_path() {
        let entry = ImageEntry::from_path(Path::new("/tmp/extract/vol1/Page10.JPG")).unwrap();
        assert_eq!(entry.dir, Path::new("/tmp/extract/vol1"));
        assert_eq!(entry.stem, "Page10");
        assert_eq!(entry.ext, "jpg");
        assert_eq!(entry.file_name(), "Page10.JPG");
    }

    #[test]
    fn test_image_entry_rejects_extensionless() {
        assert!(ImageEntry::from_path(Path::new("/tmp/extract/README")).is_none());
    }

    #[test]
    fn test_history_entry_wire_shape() {
        let entry = HistoryEntry {
            epub_name: "book.epub".to_string(),
            display_name: "book".to_string(),
            size: 42,
            created_at: Utc::now(),
            download_url: "book.epub".to_string(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"epubName\""));
        assert!(json.contains("\"displayName\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"downloadUrl\""));
    }
}
