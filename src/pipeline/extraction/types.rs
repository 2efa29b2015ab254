use std::path::{Path, PathBuf};

use super::ExtractionError;

/// OCR engine abstraction (allows mocking for tests)
pub trait OcrEngine {
    /// Recognize the text on one page image.
    fn ocr_image(&self, image_path: &Path) -> Result<String, ExtractionError>;
}

/// Rasterizes PDF pages so they can be OCR'd.
pub trait PdfPageRenderer {
    /// Render every page of `pdf_path` into `out_dir`, returning the image
    /// paths in page order.
    fn render_pages(&self, pdf_path: &Path, out_dir: &Path)
        -> Result<Vec<PathBuf>, ExtractionError>;
}
