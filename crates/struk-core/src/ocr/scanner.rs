//! Receipt scanner combining an OCR engine with the receipt parser.

use image::{DynamicImage, GenericImageView};
use tracing::{info, warn};

use crate::error::{OcrError, Result};
use crate::models::config::OcrConfig;
use crate::models::receipt::ParsedReceipt;
use crate::receipt::{ReceiptExtractor, ReceiptParser};

use super::{OcrEngine, OcrOutput};

/// Runs OCR on a receipt image and parses the recognized text.
pub struct ReceiptScanner<E: OcrEngine> {
    engine: E,
    config: OcrConfig,
    parser: ReceiptParser,
}

impl<E: OcrEngine> ReceiptScanner<E> {
    /// Create a scanner with the default OCR configuration.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            config: OcrConfig::default(),
            parser: ReceiptParser::new(),
        }
    }

    /// Set the OCR configuration passed to the engine.
    pub fn with_config(mut self, config: OcrConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the parser used on recognized text.
    pub fn with_parser(mut self, parser: ReceiptParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }

    /// Recognize text without parsing it.
    pub fn recognize(&self, image: &DynamicImage) -> Result<OcrOutput> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OcrError::InvalidImage(format!("empty image: {}x{}", width, height)).into());
        }

        info!(
            "Recognizing receipt image {}x{} ({})",
            width,
            height,
            self.config.language.code()
        );

        let output = self.engine.recognize(image, &self.config).map_err(|e| {
            warn!("OCR engine failed: {}", e);
            e
        })?;

        if !output.has_text() {
            return Err(OcrError::NoText.into());
        }
        Ok(output)
    }

    /// Recognize and parse a receipt image.
    pub fn scan(&self, image: &DynamicImage) -> Result<ParsedReceipt> {
        let output = self.recognize(image)?;
        Ok(self.parser.extract(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrukError;
    use crate::models::config::OcrLanguage;
    use crate::models::receipt::Category;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::cell::RefCell;

    struct MockEngine {
        result: std::result::Result<(String, f32), String>,
        languages: RefCell<Vec<&'static str>>,
    }

    impl MockEngine {
        fn text(text: &str, confidence: f32) -> Self {
            Self {
                result: Ok((text.to_string(), confidence)),
                languages: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                result: Err(message.to_string()),
                languages: RefCell::new(Vec::new()),
            }
        }
    }

    impl OcrEngine for MockEngine {
        fn recognize(
            &self,
            _image: &DynamicImage,
            config: &OcrConfig,
        ) -> std::result::Result<OcrOutput, OcrError> {
            self.languages.borrow_mut().push(config.language.code());
            match &self.result {
                Ok((text, confidence)) => Ok(OcrOutput::new(text.as_str(), *confidence)),
                Err(message) => Err(OcrError::Engine(message.clone())),
            }
        }
    }

    fn image() -> DynamicImage {
        DynamicImage::new_rgb8(10, 10)
    }

    #[test]
    fn test_scan_parses_recognized_text() {
        let engine = MockEngine::text("APOTEK SEHAT\nObat Batuk 35.000\nTotal: 35.500", 87.0);
        let receipt = ReceiptScanner::new(engine).scan(&image()).unwrap();

        assert_eq!(receipt.merchant, "APOTEK SEHAT");
        assert_eq!(receipt.total, Decimal::from(35500));
        assert_eq!(receipt.category, Category::Healthcare);
        assert_eq!(receipt.confidence, 0.87);
    }

    #[test]
    fn test_config_reaches_engine() {
        let scanner = ReceiptScanner::new(MockEngine::text("TOKO", 0.9))
            .with_config(OcrConfig::default().with_language(OcrLanguage::English));
        scanner.recognize(&image()).unwrap();

        assert_eq!(scanner.config().language, OcrLanguage::English);
        assert_eq!(*scanner.engine.languages.borrow(), vec!["eng"]);
    }

    #[test]
    fn test_blank_text_is_an_error() {
        let scanner = ReceiptScanner::new(MockEngine::text("  \n ", 0.9));
        let err = scanner.scan(&image()).unwrap_err();
        assert!(matches!(err, StrukError::Ocr(OcrError::NoText)));
    }

    #[test]
    fn test_engine_failure_is_propagated() {
        let scanner = ReceiptScanner::new(MockEngine::failing("tesseract not installed"));
        let err = scanner.scan(&image()).unwrap_err();
        assert!(matches!(err, StrukError::Ocr(OcrError::Engine(_))));
        assert!(err.to_string().contains("tesseract not installed"));
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let scanner = ReceiptScanner::new(MockEngine::text("TOKO", 0.9));
        let err = scanner.recognize(&DynamicImage::new_rgb8(0, 0)).unwrap_err();
        assert!(matches!(err, StrukError::Ocr(OcrError::InvalidImage(_))));

        // The engine is never called for an empty image
        assert!(scanner.engine.languages.borrow().is_empty());
    }
}
