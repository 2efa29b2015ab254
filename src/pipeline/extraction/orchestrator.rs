use std::path::Path;

use super::ocr::TesseractCli;
use super::pdf_renderer::PdftoppmRenderer;
use super::types::{OcrEngine, PdfPageRenderer};
use super::ExtractionError;
use crate::config::OcrConfig;

/// Turns a scanned PDF into raw OCR text.
/// Uses trait objects for rendering and OCR, enabling dependency injection.
pub struct DocumentOcr {
    ocr_engine: Box<dyn OcrEngine + Send + Sync>,
    pdf_renderer: Box<dyn PdfPageRenderer + Send + Sync>,
}

impl DocumentOcr {
    pub fn new(
        ocr_engine: Box<dyn OcrEngine + Send + Sync>,
        pdf_renderer: Box<dyn PdfPageRenderer + Send + Sync>,
    ) -> Self {
        Self {
            ocr_engine,
            pdf_renderer,
        }
    }

    /// Production wiring: poppler for rendering, Tesseract for OCR.
    pub fn from_config(config: &OcrConfig) -> Result<Self, ExtractionError> {
        let ocr = TesseractCli::new(config)?;
        let renderer = PdftoppmRenderer::new(config)?;
        tracing::info!(
            tesseract = %config.tesseract_cmd.display(),
            pdftoppm = %config.pdftoppm_cmd().display(),
            language = %config.language,
            "OCR tools configured"
        );
        Ok(Self::new(Box::new(ocr), Box::new(renderer)))
    }

    /// Render every page, OCR each one, and concatenate the page texts in page
    /// order. Page images live in a scratch directory removed on return.
    pub fn extract_text(&self, pdf_path: &Path) -> Result<String, ExtractionError> {
        if !pdf_path.is_file() {
            return Err(ExtractionError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("PDF not found: {}", pdf_path.display()),
            )));
        }

        let scratch = tempfile::tempdir()?;
        let pages = self.pdf_renderer.render_pages(pdf_path, scratch.path())?;

        if pages.is_empty() {
            return Err(ExtractionError::NoPages(pdf_path.to_path_buf()));
        }

        let mut text = String::new();
        for (index, page) in pages.iter().enumerate() {
            let page_text = self.ocr_engine.ocr_image(page)?;
            tracing::debug!(
                page = index + 1,
                text_length = page_text.len(),
                "Page OCR'd"
            );
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&page_text);
        }

        tracing::info!(
            pdf = %pdf_path.display(),
            pages = pages.len(),
            text_length = text.len(),
            "Text extraction complete"
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::ocr::MockOcrEngine;
    use crate::pipeline::extraction::pdf_renderer::MockPdfRenderer;
    use std::path::PathBuf;

    fn fake_pdf() -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        std::fs::write(file.path(), b"%PDF-1.4 fake").unwrap();
        file
    }

    struct FailingOcr;

    impl OcrEngine for FailingOcr {
        fn ocr_image(&self, _image_path: &Path) -> Result<String, ExtractionError> {
            Err(ExtractionError::OcrProcessing("engine crashed".into()))
        }
    }

    struct FailingRenderer;

    impl PdfPageRenderer for FailingRenderer {
        fn render_pages(
            &self,
            _pdf_path: &Path,
            _out_dir: &Path,
        ) -> Result<Vec<PathBuf>, ExtractionError> {
            Err(ExtractionError::PdfRendering("corrupt".into()))
        }
    }

    #[test]
    fn concatenates_pages_in_order() {
        let ocr = MockOcrEngine::new("")
            .with_page("page-1.png", "PREPARED FOR John Smith")
            .with_page("page-2.png", "72 bpm")
            .with_page("page-3.png", "130/85");
        let doc_ocr = DocumentOcr::new(Box::new(ocr), Box::new(MockPdfRenderer::new(3)));
        let pdf = fake_pdf();
        let text = doc_ocr.extract_text(pdf.path()).unwrap();
        assert_eq!(text, "PREPARED FOR John Smith\n72 bpm\n130/85");
    }

    #[test]
    fn zero_pages_is_an_error() {
        let doc_ocr = DocumentOcr::new(
            Box::new(MockOcrEngine::new("x")),
            Box::new(MockPdfRenderer::new(0)),
        );
        let pdf = fake_pdf();
        let err = doc_ocr.extract_text(pdf.path()).unwrap_err();
        assert!(matches!(err, ExtractionError::NoPages(_)));
    }

    #[test]
    fn missing_pdf_is_an_io_error() {
        let doc_ocr = DocumentOcr::new(
            Box::new(MockOcrEngine::new("x")),
            Box::new(MockPdfRenderer::new(1)),
        );
        let err = doc_ocr
            .extract_text(Path::new("/definitely/not/here.pdf"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Io(_)));
    }

    #[test]
    fn ocr_failure_propagates() {
        let doc_ocr = DocumentOcr::new(Box::new(FailingOcr), Box::new(MockPdfRenderer::new(2)));
        let pdf = fake_pdf();
        let err = doc_ocr.extract_text(pdf.path()).unwrap_err();
        assert!(matches!(err, ExtractionError::OcrProcessing(_)));
    }

    #[test]
    fn render_failure_propagates() {
        let doc_ocr = DocumentOcr::new(Box::new(MockOcrEngine::new("x")), Box::new(FailingRenderer));
        let pdf = fake_pdf();
        let err = doc_ocr.extract_text(pdf.path()).unwrap_err();
        assert!(matches!(err, ExtractionError::PdfRendering(_)));
    }
}
