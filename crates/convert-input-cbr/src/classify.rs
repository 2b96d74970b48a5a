//! Maps extractor diagnostics to a fallback decision.
//!
//! Keyword sniffing over tool output is a fragile heuristic, so it lives
//! here as one independently testable function with a fixed marker set.

/// Case-insensitive markers that indicate a modern/alternate RAR format the
/// primary extractor cannot handle.
const FALLBACK_MARKERS: &[&str] = &["unsupported method", "rar version", "encrypted", "rar5"];

/// Whether the primary tool's diagnostics call for the `unrar` fallback.
pub fn needs_unrar_fallback(output: &str) -> bool {
    if output.is_empty() {
        return false;
    }
    let haystack = output.to_lowercase();
    FALLBACK_MARKERS.iter().any(|marker| haystack.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_output_never_falls_back() {
        assert!(!needs_unrar_fallback(""));
    }

    #[test]
    fn test_rar5_marker() {
        assert!(needs_unrar_fallback("ERROR: archive uses RAR5 format"));
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        assert!(needs_unrar_fallback("Unsupported Method"));
        assert!(needs_unrar_fallback("unsupported method in stream"));
        assert!(needs_unrar_fallback("this RAR VERSION is not supported"));
        assert!(needs_unrar_fallback("file is Encrypted"));
    }

    #[test]
    fn test_unrelated_diagnostics_do_not_fall_back() {
        assert!(!needs_unrar_fallback("cannot open file: permission denied"));
        assert!(!needs_unrar_fallback("CRC failed in data.bin"));
    }
}
