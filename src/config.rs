use std::path::{Path, PathBuf};

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "VitalScan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_TESSERACT_CMD: &str = "VITALSCAN_TESSERACT_CMD";
pub const ENV_POPPLER_PATH: &str = "VITALSCAN_POPPLER_PATH";
pub const ENV_OCR_LANG: &str = "VITALSCAN_OCR_LANG";
pub const ENV_RENDER_DPI: &str = "VITALSCAN_RENDER_DPI";

const DEFAULT_TESSERACT_CMD: &str = "tesseract";
const DEFAULT_OCR_LANG: &str = "eng";
const DEFAULT_RENDER_DPI: u32 = 200;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "vitalscan=info,vitalscan_lib=info"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Locations and settings for the external OCR tools.
///
/// Resolved once at startup and passed into the engines; nothing below
/// `config` reads the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    /// Tesseract executable, either a bare name looked up on `PATH` or a full path.
    pub tesseract_cmd: PathBuf,
    /// Directory holding poppler's `pdftoppm`. `None` means look it up on `PATH`.
    pub poppler_dir: Option<PathBuf>,
    /// Tesseract language spec, e.g. "eng" or "eng+fra".
    pub language: String,
    /// Resolution pages are rasterized at before OCR.
    pub render_dpi: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: PathBuf::from(DEFAULT_TESSERACT_CMD),
            poppler_dir: None,
            language: DEFAULT_OCR_LANG.to_string(),
            render_dpi: DEFAULT_RENDER_DPI,
        }
    }
}

impl OcrConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(cmd) = get(ENV_TESSERACT_CMD) {
            config.tesseract_cmd = PathBuf::from(cmd);
        }
        if let Some(dir) = get(ENV_POPPLER_PATH) {
            config.poppler_dir = Some(PathBuf::from(dir));
        }
        if let Some(lang) = get(ENV_OCR_LANG) {
            config.language = lang.trim().to_string();
        }
        if let Some(dpi) = get(ENV_RENDER_DPI) {
            config.render_dpi = dpi
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|d| *d > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_RENDER_DPI.into(),
                    value: dpi,
                })?;
        }

        Ok(config)
    }

    /// Path to `pdftoppm`, inside `poppler_dir` when one is configured.
    pub fn pdftoppm_cmd(&self) -> PathBuf {
        match &self.poppler_dir {
            Some(dir) => dir.join(pdftoppm_binary_name()),
            None => PathBuf::from(pdftoppm_binary_name()),
        }
    }
}

fn pdftoppm_binary_name() -> &'static str {
    if cfg!(windows) {
        "pdftoppm.exe"
    } else {
        "pdftoppm"
    }
}

/// True when `cmd` names a specific file (rather than a bare program name
/// resolved through `PATH`) and that file does not exist.
pub fn is_missing_explicit_path(cmd: &Path) -> bool {
    cmd.components().count() > 1 && !cmd.exists()
}
