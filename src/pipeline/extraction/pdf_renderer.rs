//! PDF page rasterization via poppler's `pdftoppm`.
//!
//! Scanned reports carry no text layer, so every page is rendered to PNG and
//! handed to the OCR engine.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::types::PdfPageRenderer;
use super::ExtractionError;
use crate::config::{is_missing_explicit_path, OcrConfig};

/// File prefix for rendered pages; pdftoppm appends "-<page>.png".
const PAGE_PREFIX: &str = "page";

/// Renders PDF pages by shelling out to `pdftoppm`.
pub struct PdftoppmRenderer {
    command: PathBuf,
    dpi: u32,
}

impl PdftoppmRenderer {
    pub fn new(config: &OcrConfig) -> Result<Self, ExtractionError> {
        let command = config.pdftoppm_cmd();
        if is_missing_explicit_path(&command) {
            return Err(ExtractionError::ToolNotFound(command));
        }
        Ok(Self {
            command,
            dpi: config.render_dpi,
        })
    }
}

impl PdfPageRenderer for PdftoppmRenderer {
    fn render_pages(
        &self,
        pdf_path: &Path,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, ExtractionError> {
        let output = Command::new(&self.command)
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-png")
            .arg(pdf_path)
            .arg(out_dir.join(PAGE_PREFIX))
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ExtractionError::ToolNotFound(self.command.clone())
                } else {
                    ExtractionError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(ExtractionError::PdfRendering(format!(
                "pdftoppm exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let pages = collect_rendered_pages(out_dir)?;

        tracing::info!(
            pdf = %pdf_path.display(),
            pages = pages.len(),
            dpi = self.dpi,
            "Rendered PDF pages"
        );

        Ok(pages)
    }
}

/// List rendered page images in `dir`, ordered by page number.
pub fn collect_rendered_pages(dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    let mut pages: Vec<(u32, PathBuf)> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("png") {
            continue;
        }
        if let Some(number) = page_number_of(&path) {
            pages.push((number, path));
        }
    }

    pages.sort_by_key(|(number, _)| *number);
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

/// "page-07.png" → 7.
fn page_number_of(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let (prefix, number) = stem.rsplit_once('-')?;
    if prefix != PAGE_PREFIX {
        return None;
    }
    number.parse().ok()
}

/// Test renderer that pretends a PDF has `page_count` pages.
/// No files are written; returned paths only carry the page order.
pub struct MockPdfRenderer {
    pub page_count: usize,
}

impl MockPdfRenderer {
    pub fn new(page_count: usize) -> Self {
        Self { page_count }
    }
}

impl PdfPageRenderer for MockPdfRenderer {
    fn render_pages(
        &self,
        _pdf_path: &Path,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, ExtractionError> {
        Ok((1..=self.page_count)
            .map(|n| out_dir.join(format!("{PAGE_PREFIX}-{n}.png")))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_numbers_parse_with_padding() {
        assert_eq!(page_number_of(Path::new("/tmp/x/page-1.png")), Some(1));
        assert_eq!(page_number_of(Path::new("/tmp/x/page-012.png")), Some(12));
        assert_eq!(page_number_of(Path::new("/tmp/x/cover.png")), None);
        assert_eq!(page_number_of(Path::new("/tmp/x/other-3.png")), None);
    }

    #[test]
    fn collects_pages_in_numeric_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-10.png", "page-2.png", "page-1.png", "notes.txt", "page-x.png"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let pages = collect_rendered_pages(dir.path()).unwrap();
        let names: Vec<String> = pages
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["page-1.png", "page-2.png", "page-10.png"]);
    }

    #[test]
    fn empty_dir_yields_no_pages() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_rendered_pages(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_explicit_poppler_dir_is_reported() {
        let config = OcrConfig {
            poppler_dir: Some(PathBuf::from("/definitely/not/here")),
            ..Default::default()
        };
        let err = PdftoppmRenderer::new(&config).err().unwrap();
        assert!(matches!(err, ExtractionError::ToolNotFound(_)));
    }

    #[test]
    fn mock_renderer_returns_ordered_paths() {
        let renderer = MockPdfRenderer::new(3);
        let pages = renderer
            .render_pages(Path::new("doc.pdf"), Path::new("/tmp/out"))
            .unwrap();
        assert_eq!(pages.len(), 3);
        assert!(pages[0].ends_with("page-1.png"));
        assert!(pages[2].ends_with("page-3.png"));
    }
}
