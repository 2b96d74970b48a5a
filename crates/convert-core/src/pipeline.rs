//! Pipeline orchestrator — drives one archive-to-EPUB conversion.
//!
//! Each run owns a freshly created, uniquely named temporary extraction
//! directory and removes it on every exit path. Steps short-circuit to a
//! single terminal error; there is no retry inside the core.

use std::fs;
use std::path::Path;

use chrono::Utc;
use log::info;

use crate::collect::{collect_images, first_empty_image};
use crate::error::{ConvertError, Result};
use crate::job::{ConversionSummary, HistoryEntry};
use crate::ports::{Extractor, HistoryStore, PackageWriter};

/// The conversion pipeline orchestrator.
pub struct Pipeline {
    extractor: Box<dyn Extractor>,
    writer: Box<dyn PackageWriter>,
    history: Option<Box<dyn HistoryStore>>,
}

impl Pipeline {
    pub fn new(extractor: Box<dyn Extractor>, writer: Box<dyn PackageWriter>) -> Self {
        Self {
            extractor,
            writer,
            history: None,
        }
    }

    /// Record completed conversions in the given history store.
    pub fn with_history(mut self, history: Box<dyn HistoryStore>) -> Self {
        self.history = Some(history);
        self
    }

    /// Convert one archive into one EPUB package.
    ///
    /// The temporary extraction directory is removed before this returns,
    /// success or failure.
    pub fn run(&self, archive: &Path, output: &Path, title: &str) -> Result<ConversionSummary> {
        let temp = tempfile::Builder::new().prefix("cbr_extract_").tempdir()?;
        info!(
            "Converting {} -> {} (workdir {})",
            archive.display(),
            output.display(),
            temp.path().display()
        );

        // TempDir removes the tree recursively on drop, whichever way
        // run_in() exits. It does not follow symlinks while deleting.
        let result = self.run_in(temp.path(), archive, output, title);

        if let (Ok(summary), Some(history)) = (&result, &self.history) {
            history.append(entry_for(summary, title));
        }

        result
    }

    fn run_in(
        &self,
        extract_dir: &Path,
        archive: &Path,
        output: &Path,
        title: &str,
    ) -> Result<ConversionSummary> {
        info!("Running {} extractor...", self.extractor.name());
        let report = self.extractor.extract(archive, extract_dir)?;
        if !report.output.is_empty() {
            log::debug!("Extractor diagnostics:\n{}", report.output);
        }

        // read_dir already skips the dot entries, so any entry means content.
        if fs::read_dir(extract_dir)?.next().is_none() {
            return Err(ConvertError::EmptyResult(
                "extraction produced no files".to_string(),
            ));
        }

        let images = collect_images(extract_dir)?;
        if images.is_empty() {
            return Err(ConvertError::EmptyResult(
                "no page images found in the archive".to_string(),
            ));
        }
        if let Some(image) = first_empty_image(&images)? {
            return Err(ConvertError::EmptyResult(format!(
                "extracted image \"{}\" is empty; install p7zip-full and p7zip-rar for full CBR/RAR support",
                image.file_name()
            )));
        }

        info!("Running {} writer...", self.writer.name());
        self.writer.write(&images, output, title)?;

        if !output.exists() {
            return Err(ConvertError::OutputVerification(format!(
                "{} is missing after the build reported success",
                output.display()
            )));
        }
        let size_bytes = fs::metadata(output)?.len();

        info!(
            "Conversion complete: {} ({} bytes, {} pages)",
            output.display(),
            size_bytes,
            images.len()
        );
        Ok(ConversionSummary {
            output_path: output.to_path_buf(),
            size_bytes,
        })
    }
}

fn entry_for(summary: &ConversionSummary, title: &str) -> HistoryEntry {
    let epub_name = summary
        .output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    HistoryEntry {
        display_name: title.to_string(),
        size: summary.size_bytes,
        created_at: Utc::now(),
        download_url: epub_name.clone(),
        epub_name,
    }
}
