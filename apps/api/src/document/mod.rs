//! PDF page extractor. Turns an uploaded résumé into the single JPEG image the model reads.
//!
//! Only the first page is ever rendered; later pages are ignored.

use std::io::Cursor;

use base64::Engine;
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod pdfium;

pub use pdfium::PdfiumRasterizer;

pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// Zero-based index of the only page that is ever rasterized.
pub const FIRST_PAGE: u16 = 0;

const PDF_SIGNATURE: &[u8] = b"%PDF";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("No file uploaded")]
    Missing,

    #[error("Uploaded file is empty")]
    Empty,

    #[error("Uploaded file is not a PDF")]
    NotPdf,

    #[error("PDF is password protected")]
    PasswordProtected,

    #[error("PDF has no pages")]
    NoPages,

    #[error("Unreadable PDF: {reason}")]
    Unreadable { reason: String },

    #[error("Failed to render page {page}: {reason}")]
    Render { page: u16, reason: String },

    #[error("Failed to encode page as JPEG: {0}")]
    Encode(#[from] image::ImageError),

    /// The rendering library itself is unavailable; not a fault of the upload.
    #[error("PDF backend unavailable: {reason}")]
    Backend { reason: String },
}

impl DocumentError {
    /// Message safe to show to the user. Library details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            DocumentError::Missing => "No file uploaded".to_string(),
            DocumentError::Empty => "The uploaded file is empty".to_string(),
            DocumentError::NotPdf => "The uploaded file is not a PDF".to_string(),
            DocumentError::PasswordProtected => {
                "The PDF is password protected; upload an unlocked copy".to_string()
            }
            DocumentError::NoPages => "The PDF has no pages".to_string(),
            DocumentError::Unreadable { .. } => "The PDF could not be read".to_string(),
            DocumentError::Render { .. } | DocumentError::Encode(_) => {
                "The first page of the PDF could not be converted to an image".to_string()
            }
            DocumentError::Backend { .. } => "An internal server error occurred".to_string(),
        }
    }
}

/// First page of a document as a base64 JPEG, in the shape the model's inline-data part expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPageImage {
    pub mime_type: String,
    pub data: String,
}

impl EncodedPageImage {
    pub fn jpeg(bytes: &[u8]) -> Self {
        Self {
            mime_type: JPEG_MIME_TYPE.to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// Renders a single page of a PDF to pixels.
///
/// Implementations are blocking; async callers run them via `spawn_blocking`.
pub trait PageRasterizer: Send + Sync {
    fn render_page(&self, pdf: &[u8], page_index: u16) -> Result<DynamicImage, DocumentError>;
}

/// Renders the first page of `pdf` and encodes it as a base64 JPEG.
pub fn extract_first_page(
    rasterizer: &dyn PageRasterizer,
    pdf: &[u8],
) -> Result<EncodedPageImage, DocumentError> {
    if pdf.is_empty() {
        return Err(DocumentError::Empty);
    }
    if !pdf.starts_with(PDF_SIGNATURE) {
        return Err(DocumentError::NotPdf);
    }

    let page = rasterizer.render_page(pdf, FIRST_PAGE)?;
    let jpeg = encode_jpeg(&page)?;

    tracing::debug!(
        width = page.width(),
        height = page.height(),
        jpeg_bytes = jpeg.len(),
        "Encoded first page"
    );

    Ok(EncodedPageImage::jpeg(&jpeg))
}

/// JPEG has no alpha channel, so the page is flattened to RGB first.
fn encode_jpeg(page: &DynamicImage) -> Result<Vec<u8>, DocumentError> {
    let rgb = DynamicImage::ImageRgb8(page.to_rgb8());
    let mut bytes = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;
    Ok(bytes)
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeRasterizer, MINIMAL_PDF};
    use super::*;

    fn decode(image: &EncodedPageImage) -> DynamicImage {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&image.data)
            .unwrap();
        image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap()
    }

    #[test]
    fn test_single_page_is_tagged_jpeg() {
        let rasterizer = FakeRasterizer::single_page();
        let image = extract_first_page(&rasterizer, MINIMAL_PDF).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert!(!image.data.is_empty());
    }

    #[test]
    fn test_payload_decodes_to_jpeg_of_page_size() {
        let rasterizer = FakeRasterizer::single_page();
        let image = extract_first_page(&rasterizer, MINIMAL_PDF).unwrap();
        let decoded = decode(&image);
        assert_eq!((decoded.width(), decoded.height()), (32, 48));
    }

    #[test]
    fn test_only_first_page_is_rendered() {
        let rasterizer = FakeRasterizer::with_pages(&[
            [255, 0, 0, 255],
            [0, 255, 0, 255],
            [0, 0, 255, 255],
        ]);
        extract_first_page(&rasterizer, MINIMAL_PDF).unwrap();
        assert_eq!(*rasterizer.requested.lock().unwrap(), vec![FIRST_PAGE]);
    }

    #[test]
    fn test_later_pages_do_not_affect_output() {
        let first = [10, 120, 200, 255];
        let single = FakeRasterizer::with_pages(&[first]);
        let multi = FakeRasterizer::with_pages(&[first, [0, 0, 0, 255], [255, 255, 0, 255]]);

        let a = extract_first_page(&single, MINIMAL_PDF).unwrap();
        let b = extract_first_page(&multi, MINIMAL_PDF).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_upload_fails_without_rendering() {
        let rasterizer = FakeRasterizer::single_page();
        let err = extract_first_page(&rasterizer, b"").unwrap_err();
        assert!(matches!(err, DocumentError::Empty));
        assert!(rasterizer.requested.lock().unwrap().is_empty());
    }

    #[test]
    fn test_non_pdf_upload_fails_without_rendering() {
        let rasterizer = FakeRasterizer::single_page();
        let err = extract_first_page(&rasterizer, b"GIF89a not a resume").unwrap_err();
        assert!(matches!(err, DocumentError::NotPdf));
        assert!(rasterizer.requested.lock().unwrap().is_empty());
    }

    #[test]
    fn test_zero_page_document_fails() {
        let rasterizer = FakeRasterizer::with_pages(&[]);
        let err = extract_first_page(&rasterizer, MINIMAL_PDF).unwrap_err();
        assert!(matches!(err, DocumentError::NoPages));
    }

    #[test]
    fn test_client_message_hides_library_detail() {
        let err = DocumentError::Unreadable {
            reason: "FPDF_ERR_FORMAT at offset 0x1f".to_string(),
        };
        assert!(!err.client_message().contains("FPDF"));
    }

    #[test]
    fn test_encoded_image_serializes_with_mime_type_and_data() {
        let image = EncodedPageImage::jpeg(b"abc");
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["mime_type"], "image/jpeg");
        assert_eq!(json["data"], "YWJj");
    }
}
