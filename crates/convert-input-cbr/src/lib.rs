//! CBR/CBZ input — extracts comic archives with external tools.
//!
//! `7z` handles both RAR- and zip-based archives and is tried first. When
//! its diagnostics flag a modern RAR variant, `unrar` (if installed) gets a
//! second attempt with overwrite-on-conflict semantics. Exactly two tiers;
//! there is no further fallback chain.

mod classify;
mod extract;
mod tools;

pub use classify::needs_unrar_fallback;
pub use extract::CbrExtractor;
pub use tools::SystemTools;
