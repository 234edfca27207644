//! Configuration structures for the receipt pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrukError};

/// Characters the OCR engine is allowed to emit by default.
pub const DEFAULT_WHITELIST: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz.,:-/()[]{}@#$%&*+=<>?!\"'`~^|\\";

/// Main configuration for the struk pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrukConfig {
    /// OCR invocation configuration.
    pub ocr: OcrConfig,

    /// Receipt parsing configuration.
    pub parsing: ParsingConfig,

    /// Presentation configuration.
    pub display: DisplayConfig,
}

/// Language pack requested from the OCR engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrLanguage {
    /// Indonesian with English fallback.
    #[default]
    IndonesianEnglish,
    /// English only.
    English,
}

impl OcrLanguage {
    /// Tesseract language code.
    pub fn code(&self) -> &'static str {
        match self {
            OcrLanguage::IndonesianEnglish => "ind+eng",
            OcrLanguage::English => "eng",
        }
    }
}

/// Configuration passed to the OCR engine on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Recognition language.
    pub language: OcrLanguage,

    /// Characters the engine may emit.
    pub whitelist: Option<String>,

    /// Characters the engine must never emit. Written as `null` when unset
    /// so the key stays visible in saved files.
    pub blacklist: Option<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: OcrLanguage::default(),
            whitelist: Some(DEFAULT_WHITELIST.to_string()),
            blacklist: None,
        }
    }
}

impl OcrConfig {
    /// Set the recognition language.
    pub fn with_language(mut self, language: OcrLanguage) -> Self {
        self.language = language;
        self
    }
}

/// Receipt parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Assign a category from merchant and item keywords.
    pub auto_categorize: bool,

    /// Confidence reported when the text did not come from OCR.
    pub default_confidence: f32,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            auto_categorize: true,
            default_confidence: 0.8,
        }
    }
}

/// Presentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// ISO currency code used when formatting amounts (IDR, USD, EUR, SGD).
    pub currency: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "IDR".to_string(),
        }
    }
}

impl StrukConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| StrukError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| StrukError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let confidence = self.parsing.default_confidence;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(StrukError::Config(format!(
                "parsing.default_confidence must be within 0.0..=1.0, got {}",
                confidence
            )));
        }
        if self.display.currency.trim().is_empty() {
            return Err(StrukError::Config("display.currency is empty".to_string()));
        }
        Ok(())
    }
}
