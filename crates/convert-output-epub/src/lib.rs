//! EPUB output — serializes an ordered page-image sequence to an EPUB 2
//! package (OCF container, OPF package document, NCX navigation).

mod writer;

use std::path::Path;

use convert_core::error::Result;
use convert_core::job::ImageEntry;
use convert_core::ports::PackageWriter;

pub struct EpubWriter;

impl PackageWriter for EpubWriter {
    fn name(&self) -> &str {
        "EPUB"
    }

    fn write(&self, images: &[ImageEntry], output: &Path, title: &str) -> Result<()> {
        log::info!("Writing EPUB: {}", output.display());
        writer::write_epub(images, output, title)
    }
}
