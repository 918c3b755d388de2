//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.

use super::content_stream::ContentStreamBuilder;
use super::font_manager::FontStyle;
use super::image_handler::ImageData;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::object::{Object, ObjectRef};
use std::collections::HashMap;
use std::io::Write;

/// A4 width in points.
pub const A4_WIDTH: f32 = 595.28;

/// A4 height in points.
pub const A4_HEIGHT: f32 = 841.89;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Creation date in PDF date format (`D:YYYYMMDDHHmmSS`)
    pub creation_date: Option<String>,
    /// Whether to compress content streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            subject: None,
            creator: Some(format!("{} {}", crate::NAME, crate::VERSION)),
            creation_date: None,
            compress: true,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the creation date.
    pub fn with_creation_date<Tz>(mut self, date: &chrono::DateTime<Tz>) -> Self
    where
        Tz: chrono::TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.creation_date = Some(date.format("D:%Y%m%d%H%M%S").to_string());
        self
    }

    /// Enable or disable stream compression.
    ///
    /// When enabled, content streams are compressed with FlateDecode.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// A page being built.
pub struct PageBuilder<'a> {
    page: &'a mut PageData,
}

impl<'a> PageBuilder<'a> {
    /// Page width in points.
    pub fn width(&self) -> f32 {
        self.page.width
    }

    /// Page height in points.
    pub fn height(&self) -> f32 {
        self.page.height
    }

    /// Content stream of the page.
    pub fn content(&mut self) -> &mut ContentStreamBuilder {
        &mut self.page.content_builder
    }

    /// Content stream of the page, keeping the writer borrow.
    pub fn into_content(self) -> &'a mut ContentStreamBuilder {
        let page = self.page;
        &mut page.content_builder
    }

    /// Add text to the page.
    pub fn add_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        style: FontStyle,
        font_size: f32,
    ) -> &mut Self {
        self.page
            .content_builder
            .begin_text()
            .set_font(style.resource_name(), font_size)
            .text(text, x, y);
        self
    }

    /// Draw a registered image with its lower-left corner at (x, y).
    pub fn draw_image(&mut self, resource_id: &str, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.page
            .content_builder
            .draw_image(resource_id, x, y, width, height);
        self
    }

    /// Finish building this page.
    pub fn finish(&mut self) {
        self.page.content_builder.end_text();
    }
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content_builder: ContentStreamBuilder,
}

/// PDF document writer.
///
/// Builds a complete PDF document with pages, the Helvetica font family,
/// and image XObjects.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    /// Registered images with their resource names
    images: Vec<(String, ImageData)>,
    /// Object ID counter
    next_obj_id: u32,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            images: Vec::new(),
            next_obj_id: 1,
        }
    }

    /// Allocate a new object ID.
    fn alloc_obj_id(&mut self) -> u32 {
        let id = self.next_obj_id;
        self.next_obj_id += 1;
        id
    }

    /// Add a page with the given dimensions.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        self.pages.push(PageData {
            width,
            height,
            content_builder: ContentStreamBuilder::new(),
        });
        let index = self.pages.len() - 1;
        PageBuilder {
            page: &mut self.pages[index],
        }
    }

    /// Add an A4 portrait page.
    pub fn add_a4_page(&mut self) -> PageBuilder<'_> {
        self.add_page(A4_WIDTH, A4_HEIGHT)
    }

    /// Reopen an existing page (0-indexed).
    pub fn page(&mut self, index: usize) -> Option<PageBuilder<'_>> {
        self.pages.get_mut(index).map(|page| PageBuilder { page })
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Register an image and return its resource name (e.g. `Im1`).
    pub fn register_image(&mut self, image: ImageData) -> String {
        let resource_id = format!("Im{}", self.images.len() + 1);
        self.images.push((resource_id.clone(), image));
        resource_id
    }

    fn maybe_compress(&self, raw: Vec<u8>) -> (Vec<u8>, bool) {
        if !self.config.compress {
            return (raw, false);
        }
        match compress_data(&raw) {
            Ok(compressed) => (compressed, true),
            Err(e) => {
                log::warn!("Content stream compression failed, writing uncompressed: {}", e);
                (raw, false)
            },
        }
    }

    /// Build the complete PDF document.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::compact();
        let mut objects: Vec<(u32, Object)> = Vec::new();

        let catalog_id = self.alloc_obj_id();
        let pages_id = self.alloc_obj_id();

        // Fonts
        let mut font_resources = HashMap::new();
        for style in FontStyle::ALL {
            let font_id = self.alloc_obj_id();
            objects.push((
                font_id,
                ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Font")),
                    ("Subtype", ObjectSerializer::name("Type1")),
                    ("BaseFont", ObjectSerializer::name(style.base_font())),
                    ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
                ]),
            ));
            font_resources.insert(
                style.resource_name().to_string(),
                Object::Reference(ObjectRef::new(font_id, 0)),
            );
        }

        // Images, each with an optional soft mask
        let mut xobject_resources = HashMap::new();
        let images = std::mem::take(&mut self.images);
        for (resource_id, image) in &images {
            let image_id = self.alloc_obj_id();
            let mut dict = image.build_xobject_dict();

            if let (Some(mask_dict), Some(mask_data)) = (image.build_soft_mask_dict(), &image.soft_mask) {
                let mask_id = self.alloc_obj_id();
                dict.insert("SMask".to_string(), ObjectSerializer::reference(mask_id, 0));
                objects.push((
                    mask_id,
                    Object::Stream {
                        dict: mask_dict,
                        data: bytes::Bytes::from(mask_data.clone()),
                    },
                ));
            }

            objects.push((
                image_id,
                Object::Stream {
                    dict,
                    data: bytes::Bytes::from(image.data.clone()),
                },
            ));
            xobject_resources.insert(resource_id.clone(), Object::Reference(ObjectRef::new(image_id, 0)));
        }

        let mut resources = vec![("Font", Object::Dictionary(font_resources))];
        if !xobject_resources.is_empty() {
            resources.push(("XObject", Object::Dictionary(xobject_resources)));
        }
        let resources = ObjectSerializer::dict(resources);

        // Pages
        let pages = std::mem::take(&mut self.pages);
        let mut page_refs = Vec::with_capacity(pages.len());
        for page_data in &pages {
            let page_id = self.alloc_obj_id();
            let content_id = self.alloc_obj_id();

            let (content_bytes, is_compressed) = self.maybe_compress(page_data.content_builder.build()?);
            let mut content_dict = HashMap::new();
            if is_compressed {
                content_dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
            }

            let page_obj = ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Page")),
                ("Parent", ObjectSerializer::reference(pages_id, 0)),
                (
                    "MediaBox",
                    ObjectSerializer::rect(0.0, 0.0, page_data.width as f64, page_data.height as f64),
                ),
                ("Contents", ObjectSerializer::reference(content_id, 0)),
                ("Resources", resources.clone()),
            ]);

            page_refs.push(ObjectSerializer::reference(page_id, 0));
            objects.push((page_id, page_obj));
            objects.push((
                content_id,
                Object::Stream {
                    dict: content_dict,
                    data: bytes::Bytes::from(content_bytes),
                },
            ));
        }

        objects.push((
            pages_id,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Pages")),
                ("Count", ObjectSerializer::integer(page_refs.len() as i64)),
                ("Kids", Object::Array(page_refs)),
            ]),
        ));
        objects.push((
            catalog_id,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", ObjectSerializer::reference(pages_id, 0)),
            ]),
        ));

        // Info dictionary
        let info_id = self.alloc_obj_id();
        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", ObjectSerializer::text_string(title)));
        }
        if let Some(subject) = &self.config.subject {
            info_entries.push(("Subject", ObjectSerializer::text_string(subject)));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", ObjectSerializer::text_string(creator)));
            info_entries.push(("Producer", ObjectSerializer::text_string(creator)));
        }
        if let Some(date) = &self.config.creation_date {
            info_entries.push(("CreationDate", ObjectSerializer::string(date)));
        }
        objects.push((info_id, ObjectSerializer::dict(info_entries)));

        objects.sort_by_key(|(id, _)| *id);

        // Header, with a binary marker comment
        let mut output = Vec::new();
        writeln!(output, "%PDF-{}", self.config.version)?;
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut xref_offsets = Vec::with_capacity(objects.len());
        for (id, obj) in &objects {
            xref_offsets.push(output.len());
            output.extend_from_slice(&serializer.serialize_indirect(*id, 0, obj));
        }

        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", self.next_obj_id)?;
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &xref_offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(self.next_obj_id as i64)),
            ("Root", ObjectSerializer::reference(catalog_id, 0)),
            ("Info", ObjectSerializer::reference(info_id, 0)),
        ]);

        writeln!(output, "trailer")?;
        output.extend_from_slice(&serializer.serialize(&trailer));
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!(
            "Assembled PDF: {} pages, {} images, {} objects, {} bytes",
            pages.len(),
            images.len(),
            objects.len(),
            output.len()
        );

        Ok(output)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
