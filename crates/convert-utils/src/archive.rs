//! ZIP writing utilities for assembling EPUB containers.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use zip::write::FileOptions;
use zip::ZipWriter;

/// Builder for creating ZIP archives (used for EPUB output).
pub struct ZipBuilder {
    writer: ZipWriter<File>,
}

impl ZipBuilder {
    /// Create a new ZIP file at the given path.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: ZipWriter::new(file),
        })
    }

    /// Add a file entry with the given content, deflate-compressed.
    pub fn add_file(&mut self, name: &str, content: &[u8]) -> io::Result<()> {
        let options =
            FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.writer.start_file(name, options)?;
        self.writer.write_all(content)?;
        Ok(())
    }

    /// Add a file entry stored without compression (used for mimetype in EPUB).
    pub fn add_stored(&mut self, name: &str, content: &[u8]) -> io::Result<()> {
        let options =
            FileOptions::default().compression_method(zip::CompressionMethod::Stored);
        self.writer.start_file(name, options)?;
        self.writer.write_all(content)?;
        Ok(())
    }

    /// Stream a file from disk into the archive, stored without compression.
    /// Page images are already compressed; deflating them again wastes CPU.
    pub fn add_path_stored(&mut self, name: &str, source: &Path) -> io::Result<()> {
        let mut file = File::open(source)?;
        let options =
            FileOptions::default().compression_method(zip::CompressionMethod::Stored);
        self.writer.start_file(name, options)?;
        io::copy(&mut file, &mut self.writer)?;
        Ok(())
    }

    /// Finish writing the ZIP archive.
    pub fn finish(mut self) -> io::Result<()> {
        self.writer.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::read::ZipArchive;

    #[test]
    fn test_zip_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = dir.path().join("roundtrip.zip");

        {
            let mut builder = ZipBuilder::new(&tmp).unwrap();
            builder
                .add_stored("mimetype", b"application/epub+zip")
                .unwrap();
            builder.add_file("content.xml", b"<root/>").unwrap();
            builder.finish().unwrap();
        }

        let file = File::open(&tmp).unwrap();
        let mut archive = ZipArchive::new(file).unwrap();
        assert_eq!(archive.len(), 2);

        let mut entry = archive.by_name("content.xml").unwrap();
        let mut buf = Vec::new();
        entry.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"<root/>");
    }

    #[test]
    fn test_first_entry_stays_first_and_stored() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = dir.path().join("ordered.zip");

        {
            let mut builder = ZipBuilder::new(&tmp).unwrap();
            builder
                .add_stored("mimetype", b"application/epub+zip")
                .unwrap();
            builder.add_file("later.txt", b"x").unwrap();
            builder.finish().unwrap();
        }

        let file = File::open(&tmp).unwrap();
        let mut archive = ZipArchive::new(file).unwrap();
        let first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), zip::CompressionMethod::Stored);
    }

    #[test]
    fn test_add_path_stored_streams_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("page.png");
        std::fs::write(&src, b"fake png bytes").unwrap();

        let tmp = dir.path().join("images.zip");
        {
            let mut builder = ZipBuilder::new(&tmp).unwrap();
            builder.add_path_stored("OEBPS/images/page.png", &src).unwrap();
            builder.finish().unwrap();
        }

        let file = File::open(&tmp).unwrap();
        let mut archive = ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name("OEBPS/images/page.png").unwrap();
        let mut buf = Vec::new();
        entry.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"fake png bytes");
    }

    #[test]
    fn test_add_path_stored_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = dir.path().join("missing.zip");
        let mut builder = ZipBuilder::new(&tmp).unwrap();
        let err = builder
            .add_path_stored("OEBPS/images/gone.png", &dir.path().join("gone.png"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
