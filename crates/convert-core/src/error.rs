use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input archive: {0}")]
    Input(String),

    /// Both extraction attempts failed. `details` carries the concatenated
    /// tool output for operator logs; the display string stays at exit code
    /// plus actionable hint so end users never see raw tool output.
    #[error("Failed to extract archive (exit code {code}). {hint}")]
    Extraction {
        code: i32,
        hint: ExtractionHint,
        details: String,
    },

    #[error("No usable page images: {0}")]
    EmptyResult(String),

    #[error("Failed to build EPUB: {0}")]
    Build(String),

    #[error("Output verification failed: {0}")]
    OutputVerification(String),
}

/// Actionable hint attached to an extraction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionHint {
    /// Primary-tool diagnostics flagged a modern/alternate RAR format and no
    /// fallback extractor is installed.
    InstallUnrar,
    /// Generic failure: the archive is likely corrupt or password-protected.
    PossiblyCorrupt,
}

impl fmt::Display for ExtractionHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionHint::InstallUnrar => f.write_str(
                "Install the \"unrar\" utility (RARLAB) or enable RAR5 support for modern CBR archives.",
            ),
            ExtractionHint::PossiblyCorrupt => f.write_str(
                "Check that the archive is not corrupt or password-protected.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
