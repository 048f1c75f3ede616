//! Export surface: wraps a rasterized capture of the rendered layout into a
//! downloadable PDF.
//!
//! Rasterization itself is an external collaborator — the embedding UI
//! paints the [`Layout`](crate::render::Layout) and hands the capture in as
//! a [`RasterImage`]. This module only does the paging: a fixed A4 page
//! width, height preserving the capture's aspect ratio, and the JPEG
//! embedded untranscoded as the sole page content.

use lopdf::content::{Content, Operation};
use lopdf::{Document as PdfDocument, Object, Stream, dictionary};
use tracing::debug;

use crate::document::DocumentType;
use crate::error::EditorError;

/// Fixed page width: A4 (210 mm) in PDF points.
pub const PAGE_WIDTH_PT: f32 = 595.28;

/// A rasterized capture of the rendered layout, JPEG-encoded.
#[derive(Debug, Clone)]
pub struct RasterImage {
    width: u32,
    height: u32,
    jpeg: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, jpeg: Vec<u8>) -> Result<Self, EditorError> {
        if width == 0 || height == 0 {
            return Err(EditorError::Export("capture has zero dimensions".into()));
        }
        if !jpeg.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Err(EditorError::Export("capture is not JPEG data".into()));
        }
        Ok(Self {
            width,
            height,
            jpeg,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// The downloadable result: suggested file name plus PDF bytes.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// `{documentType}-{number|"new"}.pdf`
pub fn file_name(document_type: DocumentType, number: &str) -> String {
    let number = number.trim();
    let token = if number.is_empty() { "new" } else { number };
    format!("{}-{token}.pdf", document_type.file_token())
}

/// Page size for a capture: fixed width, height from the aspect ratio.
pub fn page_size(image: &RasterImage) -> (f32, f32) {
    let height = image.height as f32 * PAGE_WIDTH_PT / image.width as f32;
    (PAGE_WIDTH_PT, height)
}

/// Build a single-page PDF with the capture as its entire content.
pub fn image_to_pdf(image: &RasterImage) -> Result<Vec<u8>, EditorError> {
    let (page_width, page_height) = page_size(image);

    let mut doc = PdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();

    // JPEG data passes through untranscoded via DCTDecode.
    let image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(i64::from(image.width)),
            "Height" => Object::Integer(i64::from(image.height)),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => Object::Integer(8),
            "Filter" => "DCTDecode",
        },
        image.jpeg.clone(),
    )
    .with_compression(false);
    let image_id = doc.add_object(image_stream);

    // Scale the unit image square to fill the page exactly.
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(page_width),
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Real(page_height),
                    Object::Real(0.0),
                    Object::Real(0.0),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| EditorError::Export(format!("failed to encode page content: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => Object::Array(vec![
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(page_width),
            Object::Real(page_height),
        ]),
        "Contents" => Object::Reference(content_id),
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                "Im0" => Object::Reference(image_id),
            },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Object::Array(vec![Object::Reference(page_id)]),
            "Count" => Object::Integer(1),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| EditorError::Export(format!("failed to write PDF: {e}")))?;

    debug!(
        width = image.width,
        height = image.height,
        page_height,
        size = bytes.len(),
        "built export PDF"
    );
    Ok(bytes)
}
