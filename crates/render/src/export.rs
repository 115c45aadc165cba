//! Sheet encoders: PNG bytes, PNG data URL, and single-page PDF.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{DynamicImage, ImageOutputFormat, RgbImage};
use printpdf::{Image as PdfImage, ImageTransform, Mm, PdfDocument};
use thiserror::Error;

const PDF_DPI: f32 = 96.0;
const MM_PER_INCH: f32 = 25.4;

/// Errors encoding a rendered sheet.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("png encoding failed: {0}")]
    Png(#[from] image::ImageError),
    #[error("pdf assembly failed: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// Encode a sheet as PNG bytes.
///
/// # Errors
///
/// Returns [`ExportError::Png`] if encoding fails.
pub fn sheet_png(sheet: &RgbImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(sheet.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
    Ok(bytes)
}

/// Encode a sheet as a `data:image/png;base64,...` URL for inline `<img>`
/// sources.
///
/// # Errors
///
/// Returns [`ExportError::Png`] if encoding fails.
pub fn sheet_png_data_url(sheet: &RgbImage) -> Result<String, ExportError> {
    let png = sheet_png(sheet)?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
}

/// Assemble a single-page PDF sized exactly to the sheet at 96 dpi.
///
/// # Errors
///
/// Returns [`ExportError::Pdf`] if assembly or serialization fails.
#[allow(clippy::cast_precision_loss)]
pub fn sheet_pdf(sheet: &RgbImage, title: &str) -> Result<Vec<u8>, ExportError> {
    let (width, height) = sheet.dimensions();
    let page_width = Mm(width as f32 * MM_PER_INCH / PDF_DPI);
    let page_height = Mm(height as f32 * MM_PER_INCH / PDF_DPI);

    let (doc, page, layer) = PdfDocument::new(title, page_width, page_height, "design");
    let pdf_image = PdfImage::from_dynamic_image(&DynamicImage::ImageRgb8(sheet.clone()));
    pdf_image.add_to_layer(
        doc.get_page(page).get_layer(layer),
        ImageTransform {
            dpi: Some(PDF_DPI),
            ..ImageTransform::default()
        },
    );
    Ok(doc.save_to_bytes()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use otomono_core::JerseyDesign;

    use crate::composite::render_sheet;

    use super::*;

    fn sheet() -> RgbImage {
        render_sheet(&JerseyDesign::default())
    }

    #[test]
    fn test_png_has_magic_bytes() {
        let png = sheet_png(&sheet()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_data_url_prefix() {
        let url = sheet_png_data_url(&sheet()).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.len() > 100);
    }

    #[test]
    fn test_pdf_has_header_and_trailer() {
        let pdf = sheet_pdf(&sheet(), "Otomono Jersey").unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        let tail = String::from_utf8_lossy(&pdf[pdf.len().saturating_sub(1024)..]).into_owned();
        assert!(tail.contains("%%EOF"));
    }

    #[test]
    fn test_export_is_deterministic_for_same_design() {
        let a = sheet_png(&sheet()).unwrap();
        let b = sheet_png(&sheet()).unwrap();
        assert_eq!(a, b);
    }
}
