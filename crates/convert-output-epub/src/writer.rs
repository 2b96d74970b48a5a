//! EPUB writer — assembles a valid EPUB 2 package from an ordered image
//! sequence.
//!
//! Container layout: `mimetype` (first entry, stored uncompressed),
//! `META-INF/container.xml`, `OEBPS/content.opf`, `OEBPS/toc.ncx`, one
//! `OEBPS/pages/page_%04d.xhtml` per image, and the source images under
//! `OEBPS/images/`. Manifest, spine, and navMap all derive from the same
//! page-record sequence so their orders cannot diverge.

use std::path::Path;

use uuid::Uuid;

use convert_core::error::{ConvertError, Result};
use convert_core::job::ImageEntry;
use convert_utils::archive::ZipBuilder;
use convert_utils::mime::image_media_type;
use convert_utils::xml::{escape_xml_attr, escape_xml_text, XmlBuilder};

/// One page of the package: ids, hrefs, and the display label, all derived
/// from the image's position in the input sequence.
struct PageRecord {
    page_id: String,
    image_id: String,
    page_href: String,
    image_href: String,
    media_type: String,
    label: String,
    number: usize,
}

impl PageRecord {
    fn new(index: usize, image: &ImageEntry) -> Self {
        Self {
            page_id: format!("page_{:04}", index),
            image_id: format!("img_{:04}", index),
            page_href: format!("pages/page_{:04}.xhtml", index),
            image_href: format!("images/{}", image.file_name()),
            media_type: image_media_type(&image.ext),
            label: format!("Página {}", index + 1),
            number: index + 1,
        }
    }
}

/// Write the images as an EPUB package at `output_path`, in input order.
pub fn write_epub(images: &[ImageEntry], output_path: &Path, title: &str) -> Result<()> {
    let pages: Vec<PageRecord> = images
        .iter()
        .enumerate()
        .map(|(i, image)| PageRecord::new(i, image))
        .collect();
    let uid = package_identifier();

    let mut zip = ZipBuilder::new(output_path)
        .map_err(|e| ConvertError::Build(format!("failed to create {}: {}", output_path.display(), e)))?;

    // mimetype must be the first entry and stay uncompressed; readers
    // identify the container by these literal leading bytes.
    zip.add_stored("mimetype", b"application/epub+zip")
        .map_err(|e| ConvertError::Build(format!("failed to write mimetype: {}", e)))?;

    zip.add_file("META-INF/container.xml", generate_container_xml().as_bytes())
        .map_err(|e| ConvertError::Build(format!("failed to write container.xml: {}", e)))?;

    for (page, image) in pages.iter().zip(images) {
        let doc = page_xhtml(page, &image.file_name());
        let path = format!("OEBPS/{}", page.page_href);
        zip.add_file(&path, doc.as_bytes())
            .map_err(|e| ConvertError::Build(format!("failed to write {}: {}", path, e)))?;
    }

    let opf = generate_opf(&pages, title, &uid);
    zip.add_file("OEBPS/content.opf", opf.as_bytes())
        .map_err(|e| ConvertError::Build(format!("failed to write content.opf: {}", e)))?;

    let ncx = generate_ncx(&pages, title, &uid);
    zip.add_file("OEBPS/toc.ncx", ncx.as_bytes())
        .map_err(|e| ConvertError::Build(format!("failed to write toc.ncx: {}", e)))?;

    for (page, image) in pages.iter().zip(images) {
        let path = format!("OEBPS/{}", page.image_href);
        zip.add_path_stored(&path, &image.path).map_err(|e| {
            ConvertError::Build(format!(
                "failed to add image {}: {}",
                image.file_name(),
                e
            ))
        })?;
    }

    zip.finish()
        .map_err(|e| ConvertError::Build(format!("failed to finalize EPUB: {}", e)))?;

    log::info!(
        "EPUB written: {} ({} pages)",
        output_path.display(),
        pages.len()
    );
    Ok(())
}

/// One random identifier per build, shared by content.opf and toc.ncx.
fn package_identifier() -> String {
    format!("uuid:{}", Uuid::new_v4())
}

fn generate_container_xml() -> String {
    let mut xml = XmlBuilder::new();
    xml.open_tag(
        "container",
        &[
            ("version", "1.0"),
            ("xmlns", "urn:oasis:names:tc:opendocument:xmlns:container"),
        ],
    )
    .open_tag("rootfiles", &[])
    .empty_tag(
        "rootfile",
        &[
            ("full-path", "OEBPS/content.opf"),
            ("media-type", "application/oebps-package+xml"),
        ],
    )
    .close_tag("rootfiles")
    .close_tag("container");
    xml.build()
}

fn generate_opf(pages: &[PageRecord], title: &str, uid: &str) -> String {
    let date = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let mut xml = XmlBuilder::new();
    xml.open_tag(
        "package",
        &[
            ("version", "2.0"),
            ("xmlns", "http://www.idpf.org/2007/opf"),
            ("unique-identifier", "uuid_id"),
        ],
    );

    xml.open_tag(
        "metadata",
        &[("xmlns:dc", "http://purl.org/dc/elements/1.1/")],
    );
    xml.text_element("dc:title", title, &[]);
    xml.text_element("dc:creator", "Unknown", &[]);
    xml.text_element("dc:date", &date, &[]);
    xml.text_element("dc:identifier", uid, &[("id", "uuid_id")]);
    xml.text_element("dc:language", "es", &[]);
    xml.close_tag("metadata");

    xml.open_tag("manifest", &[]);
    xml.empty_tag(
        "item",
        &[
            ("id", "ncx"),
            ("href", "toc.ncx"),
            ("media-type", "application/x-dtbncx+xml"),
        ],
    );
    for page in pages {
        xml.empty_tag(
            "item",
            &[
                ("id", &page.page_id),
                ("href", &page.page_href),
                ("media-type", "application/xhtml+xml"),
            ],
        );
    }
    for page in pages {
        xml.empty_tag(
            "item",
            &[
                ("id", &page.image_id),
                ("href", &page.image_href),
                ("media-type", &page.media_type),
            ],
        );
    }
    xml.close_tag("manifest");

    // Spine order is display order.
    xml.open_tag("spine", &[("toc", "ncx")]);
    for page in pages {
        xml.empty_tag("itemref", &[("idref", &page.page_id)]);
    }
    xml.close_tag("spine");

    xml.close_tag("package");
    xml.build()
}

fn generate_ncx(pages: &[PageRecord], title: &str, uid: &str) -> String {
    let mut xml = XmlBuilder::new();
    xml.open_tag(
        "ncx",
        &[
            ("version", "2005-1"),
            ("xmlns", "http://www.daisy.org/z3986/2005/ncx/"),
        ],
    );

    xml.open_tag("head", &[]);
    xml.empty_tag("meta", &[("name", "dtb:uid"), ("content", uid)]);
    xml.close_tag("head");

    xml.open_tag("docTitle", &[]);
    xml.text_element("text", title, &[]);
    xml.close_tag("docTitle");

    xml.open_tag("navMap", &[]);
    for page in pages {
        let play_order = page.number.to_string();
        xml.open_tag(
            "navPoint",
            &[("id", &page.page_id), ("playOrder", &play_order)],
        );
        xml.open_tag("navLabel", &[]);
        xml.text_element("text", &page.label, &[]);
        xml.close_tag("navLabel");
        xml.empty_tag("content", &[("src", &page.page_href)]);
        xml.close_tag("navPoint");
    }
    xml.close_tag("navMap");

    xml.close_tag("ncx");
    xml.build()
}

/// Minimal XHTML wrapping one page image full-bleed: black background,
/// image scaled to full width, auto height.
fn page_xhtml(page: &PageRecord, image_name: &str) -> String {
    let label = escape_xml_text(&page.label);
    let src = escape_xml_attr(&format!("../images/{}", image_name));
    let alt = escape_xml_attr(&page.label);
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <html xmlns=\"http://www.w3.org/1999/xhtml\">\n\
         <head>\n\
         <title>{label}</title>\n\
         <meta charset=\"UTF-8\"/>\n\
         <style type=\"text/css\">\n\
         body {{ margin: 0; padding: 0; background: #000; }}\n\
         img {{ display: block; width: 100%; height: auto; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <img src=\"{src}\" alt=\"{alt}\"/>\n\
         </body>\n\
         </html>\n"
    )
}
