//! Vitals pipeline orchestrator.
//!
//! `run` is the pure core: normalize → extract → score → narrate. It never fails.
//! `DocumentProcessor` adds the OCR front end for scanned PDFs; only that part
//! can fail, and its failures are returned to the caller.

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::config::{ConfigError, OcrConfig};
use crate::models::{PatientVitals, ReportNarrative, ReportRecord, RiskAssessment};
use crate::pipeline::extraction::orchestrator::DocumentOcr;
use crate::pipeline::extraction::sanitize::normalize_ocr_text;
use crate::pipeline::extraction::vitals::extract_vitals;
use crate::pipeline::extraction::ExtractionError;
use crate::pipeline::narrative::synthesize_narrative;
use crate::pipeline::scoring::score_vitals;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors from the I/O around the pipeline; the pipeline itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Everything the pipeline produces for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VitalsReport {
    pub vitals: PatientVitals,
    pub risk: RiskAssessment,
    pub narrative: ReportNarrative,
}

impl VitalsReport {
    /// Timestamped record for the persistence layer.
    pub fn to_record(&self) -> ReportRecord {
        ReportRecord::new(&self.vitals, &self.risk, &self.narrative)
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the full pipeline over one document's concatenated OCR text.
pub fn run(raw: &str) -> VitalsReport {
    let text = normalize_ocr_text(raw);
    let vitals = extract_vitals(&text);
    let risk = score_vitals(&vitals);
    let narrative = synthesize_narrative(&vitals, &risk);

    tracing::info!(
        raw_length = raw.len(),
        normalized_length = text.len(),
        nothing_extracted = vitals.is_empty(),
        score = risk.score,
        category = risk.category.as_str(),
        "Vitals pipeline complete"
    );

    VitalsReport {
        vitals,
        risk,
        narrative,
    }
}

/// Read OCR text from a file, or from stdin when `path` is "-".
pub fn read_ocr_text(path: &Path) -> Result<String, ExtractionError> {
    let mut bytes = Vec::new();
    if path == Path::new("-") {
        std::io::stdin().read_to_end(&mut bytes)?;
    } else {
        bytes = std::fs::read(path)?;
    }
    String::from_utf8(bytes).map_err(|e| ExtractionError::EncodingError(e.to_string()))
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Scanned PDF → OCR text → `run`.
pub struct DocumentProcessor {
    ocr: DocumentOcr,
}

impl DocumentProcessor {
    pub fn new(ocr: DocumentOcr) -> Self {
        Self { ocr }
    }

    pub fn process_pdf(&self, pdf_path: &Path) -> Result<VitalsReport, ProcessingError> {
        tracing::info!(pdf = %pdf_path.display(), "Processing: starting OCR");
        let raw = self.ocr.extract_text(pdf_path)?;
        Ok(run(&raw))
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Build a `DocumentProcessor` with the configured Tesseract and poppler tools.
pub fn build_processor(config: &OcrConfig) -> Result<DocumentProcessor, ProcessingError> {
    let ocr = DocumentOcr::from_config(config)?;
    Ok(DocumentProcessor::new(ocr))
}

/// Same as `build_processor`, reading tool locations from the environment.
pub fn build_processor_from_env() -> Result<DocumentProcessor, ProcessingError> {
    let config = OcrConfig::from_env()?;
    build_processor(&config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskCategory;
    use crate::pipeline::extraction::ocr::MockOcrEngine;
    use crate::pipeline::extraction::pdf_renderer::MockPdfRenderer;

    fn mock_processor(pages: &[(&str, &str)]) -> DocumentProcessor {
        let mut ocr = MockOcrEngine::new("");
        for (name, text) in pages {
            ocr = ocr.with_page(name, text);
        }
        let renderer = MockPdfRenderer::new(pages.len());
        DocumentProcessor::new(DocumentOcr::new(Box::new(ocr), Box::new(renderer)))
    }

    #[test]
    fn end_to_end_prepared_for_report() {
        let report = run("PREPARED FOR John Smith ... 72 bpm ... 130/85 ...");
        assert_eq!(report.vitals.name, "John Smith");
        assert_eq!(report.vitals.heart_rate, 72);
        assert_eq!(report.vitals.systolic, 130);
        assert_eq!(report.vitals.diastolic, 85);
        assert_eq!(report.risk.score, 2);
        assert_eq!(report.risk.category, RiskCategory::Low);
        assert!(report.narrative.summary.contains("Patient Name: John Smith"));
        assert!(report.narrative.summary.contains("Risk Level: LOW"));
    }

    #[test]
    fn end_to_end_nothing_recognizable() {
        let report = run("lorem ipsum dolor sit amet");
        assert_eq!(report.vitals, PatientVitals::default());
        assert_eq!(report.risk.score, 2, "missing heart rate scores as bradycardia");
        assert_eq!(report.risk.category, RiskCategory::Low);
    }

    #[test]
    fn end_to_end_empty_input() {
        let report = run("");
        assert_eq!(report.vitals, PatientVitals::default());
        assert_eq!(report.risk.score, 2);
    }

    #[test]
    fn normalization_joins_fragmented_lines() {
        let raw = "PREPARED FOR\n\nJane\u{00A0}Doe\r\nPulse: 110\n bpm\nBP 150/95";
        let report = run(raw);
        assert_eq!(report.vitals.name, "Jane Doe");
        assert_eq!(report.vitals.heart_rate, 110);
        assert_eq!((report.vitals.systolic, report.vitals.diastolic), (150, 95));
        assert_eq!(report.risk.score, 6);
        assert_eq!(report.risk.category, RiskCategory::Moderate);
    }

    #[test]
    fn run_is_deterministic() {
        let raw = "Mary Jones 4/17/1962 HR 58 bpm BP 118/76";
        assert_eq!(run(raw), run(raw));
    }

    #[test]
    fn pdf_pages_feed_the_pipeline() {
        let processor = mock_processor(&[
            ("page-1.png", "PREPARED FOR John Smith"),
            ("page-2.png", "Heart rate 72 bpm"),
            ("page-3.png", "Blood pressure 130/85"),
        ]);
        let pdf = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        let report = processor.process_pdf(pdf.path()).unwrap();
        assert_eq!(report.vitals.name, "John Smith");
        assert_eq!(report.vitals.heart_rate, 72);
        assert_eq!(report.risk.category, RiskCategory::Low);
    }

    #[test]
    fn unreadable_pdf_is_surfaced() {
        let processor = mock_processor(&[]);
        let pdf = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        let err = processor.process_pdf(pdf.path()).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::Extraction(ExtractionError::NoPages(_))
        ));
    }

    #[test]
    fn text_file_input() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "PREPARED FOR John Smith 72 bpm 130/85").unwrap();
        let report = run(&read_ocr_text(file.path()).unwrap());
        assert_eq!(report.vitals.name, "John Smith");
    }

    #[test]
    fn non_utf8_text_file_is_an_encoding_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), [0xff, 0xfe, 0x00]).unwrap();
        let err = read_ocr_text(file.path()).unwrap_err();
        assert!(matches!(err, ExtractionError::EncodingError(_)));
    }

    #[test]
    fn record_from_report() {
        let report = run("PREPARED FOR John Smith 72 bpm 130/85");
        let record = report.to_record();
        assert_eq!(record.name, "John Smith");
        assert_eq!(record.risk_score, report.risk.score);
        assert_eq!(record.summary, report.narrative.summary);
    }

    #[test]
    fn missing_tool_path_fails_factory() {
        let config = OcrConfig {
            tesseract_cmd: "/definitely/not/here/tesseract".into(),
            ..Default::default()
        };
        assert!(matches!(
            build_processor(&config),
            Err(ProcessingError::Extraction(ExtractionError::ToolNotFound(_)))
        ));
    }
}
