//! Ports the pipeline composes: archive extraction, package writing, tool
//! probing, and conversion history. Concrete implementations are injected
//! rather than reached through ambient state.

use std::path::Path;

use crate::error::Result;
use crate::job::{HistoryEntry, ImageEntry};

/// Diagnostics from a successful extraction (failed ones surface as
/// [`crate::error::ConvertError::Extraction`]).
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Exit code of the last tool that ran.
    pub code: i32,
    /// Concatenated stdout/stderr of every attempted tool.
    pub output: String,
}

/// Extracts an archive's contents into a destination directory.
///
/// Implementations create `dest` if absent and must never clean it up on
/// failure; the directory belongs to the orchestrator.
pub trait Extractor: Send + Sync {
    /// Human-readable name of this extractor.
    fn name(&self) -> &str;

    fn extract(&self, archive: &Path, dest: &Path) -> Result<ExtractionReport>;
}

/// Assembles an ordered image sequence into an e-book package.
pub trait PackageWriter: Send + Sync {
    /// Human-readable name of this writer.
    fn name(&self) -> &str;

    fn write(&self, images: &[ImageEntry], output: &Path, title: &str) -> Result<()>;
}

/// Capability probe for external executables. Implementations cache the
/// answer per tool name for the process lifetime and never re-probe.
pub trait ToolAvailability: Send + Sync {
    fn exists(&self, tool: &str) -> bool;
}

/// Session-scoped record of completed conversions. Concurrent mutation is
/// not ordered here; callers needing strict append order serialize their
/// own writes.
pub trait HistoryStore: Send + Sync {
    fn append(&self, entry: HistoryEntry);

    fn list(&self) -> Vec<HistoryEntry>;

    /// Remove the entry whose package name or download locator matches.
    /// Returns whether anything was removed.
    fn remove(&self, key: &str) -> bool;
}

impl<T: HistoryStore + ?Sized> HistoryStore for std::sync::Arc<T> {
    fn append(&self, entry: HistoryEntry) {
        (**self).append(entry)
    }

    fn list(&self) -> Vec<HistoryEntry> {
        (**self).list()
    }

    fn remove(&self, key: &str) -> bool {
        (**self).remove(key)
    }
}
