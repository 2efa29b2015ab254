use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::types::OcrEngine;
use super::ExtractionError;
use crate::config::{is_missing_explicit_path, OcrConfig};

/// Tesseract OCR engine driven through its command-line binary.
pub struct TesseractCli {
    command: PathBuf,
    language: String,
}

impl TesseractCli {
    /// Fails early when the configured command is an explicit path that does not exist.
    /// Bare program names are resolved through `PATH` when first used.
    pub fn new(config: &OcrConfig) -> Result<Self, ExtractionError> {
        if is_missing_explicit_path(&config.tesseract_cmd) {
            return Err(ExtractionError::ToolNotFound(config.tesseract_cmd.clone()));
        }
        Ok(Self {
            command: config.tesseract_cmd.clone(),
            language: config.language.clone(),
        })
    }
}

impl OcrEngine for TesseractCli {
    fn ocr_image(&self, image_path: &Path) -> Result<String, ExtractionError> {
        let output = Command::new(&self.command)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ExtractionError::ToolNotFound(self.command.clone())
                } else {
                    ExtractionError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(ExtractionError::OcrProcessing(format!(
                "tesseract exited with {} on {}: {}",
                output.status,
                image_path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        // Tesseract output is UTF-8 in practice; stray bytes become U+FFFD and are
        // blanked by normalization anyway.
        let text = String::from_utf8_lossy(&output.stdout).into_owned();

        tracing::debug!(
            image = %image_path.display(),
            text_length = text.len(),
            "OCR page complete"
        );

        Ok(text)
    }
}

/// Test OCR engine. Returns a fixed text for every page unless a per-page
/// text was registered for that image's file name.
pub struct MockOcrEngine {
    pub text: String,
    pages: HashMap<String, String>,
}

impl MockOcrEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            pages: HashMap::new(),
        }
    }

    pub fn with_page(mut self, file_name: &str, text: &str) -> Self {
        self.pages.insert(file_name.to_string(), text.to_string());
        self
    }
}

impl OcrEngine for MockOcrEngine {
    fn ocr_image(&self, image_path: &Path) -> Result<String, ExtractionError> {
        let key = image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(self.pages.get(&key).unwrap_or(&self.text).clone())
    }
}
