//! cbr-convert — convert comic-book archives (CBR/CBZ) into EPUB packages.
//!
//! The one orchestrated operation is [`convert`]: extract the archive with
//! external tools (7z, falling back to unrar), order the page images
//! deterministically, and assemble an EPUB 2 package. Request handling,
//! downloads, and CLI parsing live outside this crate; it exposes the data
//! types and ports those layers need.

pub mod history;

use std::fs;
use std::path::Path;

pub use convert_core::collect::{collect_images, first_empty_image};
pub use convert_core::error::{ConvertError, ExtractionHint, Result};
pub use convert_core::job::{ConversionSummary, HistoryEntry, ImageEntry};
pub use convert_core::pipeline::Pipeline;
pub use convert_core::ports::{
    ExtractionReport, Extractor, HistoryStore, PackageWriter, ToolAvailability,
};
pub use convert_input_cbr::{CbrExtractor, SystemTools};
pub use convert_output_epub::EpubWriter;
pub use convert_utils::paths::{display_base_name, unique_output_name};

pub use history::MemoryHistory;

/// Largest accepted source archive: 500 MiB.
pub const MAX_ARCHIVE_SIZE: u64 = 500 * 1024 * 1024;

/// Accepted source-archive extensions. 7z extracts both formats, so CBZ
/// rides the same pipeline as CBR.
pub const ARCHIVE_EXTENSIONS: &[&str] = &["cbr", "cbz"];

/// Convert one comic archive into one EPUB package.
pub fn convert(archive: &Path, output: &Path, title: &str) -> Result<ConversionSummary> {
    validate_input(archive)?;
    default_pipeline().run(archive, output, title)
}

/// The default pipeline: system-tool extraction plus the EPUB writer.
pub fn default_pipeline() -> Pipeline {
    Pipeline::new(
        Box::new(CbrExtractor::new(Box::new(SystemTools))),
        Box::new(EpubWriter),
    )
}

/// Reject missing, oversized, or wrong-extension source archives before any
/// extraction work starts.
fn validate_input(archive: &Path) -> Result<()> {
    let meta = fs::metadata(archive)
        .map_err(|_| ConvertError::Input(format!("{} does not exist", archive.display())))?;
    if !meta.is_file() {
        return Err(ConvertError::Input(format!(
            "{} is not a file",
            archive.display()
        )));
    }
    if meta.len() > MAX_ARCHIVE_SIZE {
        return Err(ConvertError::Input(
            "archive exceeds the 500 MiB limit".to_string(),
        ));
    }

    let ext = archive
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !ARCHIVE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ConvertError::Input(
            "only .cbr and .cbz archives are accepted".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_missing_file() {
        let err = validate_input(Path::new("/nowhere/missing.cbr")).unwrap_err();
        assert!(matches!(err, ConvertError::Input(_)));
    }

    #[test]
    fn test_validate_rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.rar");
        fs::write(&path, b"data").unwrap();
        let err = validate_input(&path).unwrap_err();
        assert!(matches!(err, ConvertError::Input(_)));
    }

    #[test]
    fn test_validate_accepts_cbr_and_cbz_any_case() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.cbr", "b.cbz", "c.CBR", "d.CbZ"] {
            let path = dir.path().join(name);
            fs::write(&path, b"data").unwrap();
            validate_input(&path).unwrap();
        }
    }

    #[test]
    fn test_validate_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folder.cbr");
        fs::create_dir(&path).unwrap();
        let err = validate_input(&path).unwrap_err();
        assert!(matches!(err, ConvertError::Input(_)));
    }
}
