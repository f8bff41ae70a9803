//! PDFium-backed rasterizer.

use std::path::PathBuf;

use image::DynamicImage;
use pdfium_render::prelude::*;

use super::{DocumentError, PageRasterizer};

/// Renders pages through PDFium. A fresh binding is made per call since PDFium is not thread-safe.
#[derive(Debug, Clone)]
pub struct PdfiumRasterizer {
    library_path: Option<PathBuf>,
    target_width: u16,
}

impl PdfiumRasterizer {
    pub fn new(library_path: Option<PathBuf>, target_width: u16) -> Self {
        Self {
            library_path,
            target_width,
        }
    }

    fn bind(&self) -> Result<Pdfium, DocumentError> {
        if let Some(dir) = &self.library_path {
            match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)) {
                Ok(bindings) => return Ok(Pdfium::new(bindings)),
                Err(e) => tracing::warn!(
                    path = %dir.display(),
                    "Configured PDFium library could not be bound, falling back: {e}"
                ),
            }
        }

        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| DocumentError::Backend {
                reason: format!("Failed to initialize PDFium: {e}"),
            })?;

        Ok(Pdfium::new(bindings))
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn render_page(&self, pdf: &[u8], page_index: u16) -> Result<DynamicImage, DocumentError> {
        let pdfium = self.bind()?;

        let document = pdfium
            .load_pdf_from_byte_slice(pdf, None)
            .map_err(map_pdfium_error)?;

        let pages = document.pages();
        if pages.len() == 0 {
            return Err(DocumentError::NoPages);
        }

        let page = pages.get(page_index).map_err(|e| DocumentError::Render {
            page: page_index,
            reason: e.to_string(),
        })?;

        let config = PdfRenderConfig::new()
            .set_target_width(self.target_width as i32)
            .render_form_data(true)
            .render_annotations(true);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| DocumentError::Render {
                page: page_index,
                reason: e.to_string(),
            })?;

        tracing::debug!(
            page_count = pages.len(),
            page_index,
            "Rendered PDF page"
        );

        Ok(bitmap.as_image())
    }
}

fn map_pdfium_error(err: PdfiumError) -> DocumentError {
    match err {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            DocumentError::PasswordProtected
        }
        _ => DocumentError::Unreadable {
            reason: err.to_string(),
        },
    }
}
