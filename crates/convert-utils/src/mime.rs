//! Media-type mapping for page images.

/// Media type for a page image, from its lowercase file extension.
///
/// Both `jpg` and `jpeg` map to `image/jpeg`; everything else maps to
/// `image/<extension>`, which is correct for the remaining page formats
/// (png, gif, bmp, webp, tiff).
pub fn image_media_type(ext: &str) -> String {
    match ext {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        other => format!("image/{}", other),
    }
}
