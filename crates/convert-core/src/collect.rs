//! Image collection — walks an extracted tree and produces the deterministic
//! page order: owning directory first (byte-wise), then natural-order
//! case-insensitive filename within a directory.

use std::io;
use std::path::Path;

use walkdir::WalkDir;

use convert_utils::natsort::natural_cmp_ignore_case;

use crate::error::Result;
use crate::job::ImageEntry;

/// Extensions recognized as comic page images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff"];

/// Recursively collect page images under `root` in display order.
///
/// The result is a total order, stable across runs for identical input: all
/// entries of one directory are contiguous, directories order byte-wise
/// relative to each other, and filenames (extension stripped) order with
/// natural-order, case-insensitive semantics. An empty result is valid here;
/// the caller treats it as fatal.
pub fn collect_images(root: &Path) -> Result<Vec<ImageEntry>> {
    let mut images = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(image) = ImageEntry::from_path(entry.path()) {
            if IMAGE_EXTENSIONS.contains(&image.ext.as_str()) {
                images.push(image);
            }
        }
    }

    images.sort_by(|a, b| {
        a.dir
            .as_os_str()
            .as_encoded_bytes()
            .cmp(b.dir.as_os_str().as_encoded_bytes())
            .then_with(|| natural_cmp_ignore_case(&a.stem, &b.stem))
    });

    log::info!("Collected {} page images under {}", images.len(), root.display());
    Ok(images)
}

/// Find the first zero-byte image in sequence order, if any. A zero-byte
/// page signals a failed or partial extraction; the scan short-circuits at
/// the first offender.
pub fn first_empty_image(images: &[ImageEntry]) -> io::Result<Option<&ImageEntry>> {
    for image in images {
        if std::fs::metadata(&image.path)?.len() == 0 {
            return Ok(Some(image));
        }
    }
    Ok(None)
}
