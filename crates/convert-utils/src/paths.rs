//! Output-name handling: collision-free file names and display names.

use std::path::Path;

/// Pick a file name in `dir` that does not collide with an existing file,
/// appending ` (N)` before the extension until the name is free.
pub fn unique_output_name(dir: &Path, file_name: &str) -> String {
    let (base, ext) = split_extension(file_name);
    let mut candidate = file_name.to_string();
    let mut counter = 1u32;

    while dir.join(&candidate).exists() {
        candidate = format!("{} ({}){}", base, counter, ext);
        counter += 1;
    }

    candidate
}

/// Derive a display base name from an uploaded file name: strips the
/// hex upload-id prefix (`<hex>_`) if present, then the extension.
pub fn display_base_name(file_name: &str) -> String {
    let stripped = strip_upload_prefix(file_name);
    split_extension(stripped).0.to_string()
}

fn strip_upload_prefix(file_name: &str) -> &str {
    if let Some(pos) = file_name.find('_') {
        let prefix = &file_name[..pos];
        if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return &file_name[pos + 1..];
        }
    }
    file_name
}

/// Split into (base, extension-with-dot). Names without an extension, or
/// dotfiles, come back with an empty extension part.
fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(pos) if pos > 0 => (&file_name[..pos], &file_name[pos..]),
        _ => (file_name, ""),
    }
}
