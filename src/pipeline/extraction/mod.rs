pub mod types;
pub mod sanitize;
pub mod vitals;
pub mod ocr;
pub mod pdf_renderer;
pub mod orchestrator;

pub use types::*;
pub use sanitize::*;
pub use vitals::*;
pub use orchestrator::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("External tool not found: {0}")]
    ToolNotFound(PathBuf),

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("PDF rendering failed: {0}")]
    PdfRendering(String),

    #[error("No pages could be rendered from: {0}")]
    NoPages(PathBuf),

    #[error("Text encoding error: {0}")]
    EncodingError(String),
}
