//! OCR boundary.
//!
//! Text recognition itself is delegated to an [`OcrEngine`] implementation
//! supplied by the caller; this module only defines what an engine returns
//! and how that output reaches the receipt parser.

mod scanner;

pub use scanner::ReceiptScanner;

use image::DynamicImage;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Axis-aligned box around a recognized word or line, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Vertical center of the box.
    pub fn center_y(&self) -> f32 {
        self.y as f32 + self.height as f32 / 2.0
    }
}

/// Text recognized from one receipt image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrOutput {
    /// Recognized text, lines separated by `\n`.
    pub text: String,

    /// Recognition confidence in `0.0..=1.0`.
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: f32,

    /// Word or line boxes, when the engine reports them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boxes: Vec<BoundingBox>,
}

impl OcrOutput {
    /// Create output from recognized text.
    ///
    /// Engines that report confidence as a percentage (`87.0`) are scaled
    /// into `0.0..=1.0`; anything non-finite becomes `0.0`.
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence: normalize_confidence(confidence),
            boxes: Vec::new(),
        }
    }

    /// Attach word or line boxes.
    pub fn with_boxes(mut self, boxes: Vec<BoundingBox>) -> Self {
        self.boxes = boxes;
        self
    }

    /// Whether the engine recognized any non-whitespace text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

fn normalize_confidence(confidence: f32) -> f32 {
    if !confidence.is_finite() {
        return 0.0;
    }
    let scaled = if confidence > 1.0 {
        confidence / 100.0
    } else {
        confidence
    };
    scaled.clamp(0.0, 1.0)
}

fn deserialize_confidence<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    f32::deserialize(deserializer).map(normalize_confidence)
}

/// A text recognition engine.
pub trait OcrEngine {
    /// Recognize the text printed on a receipt image.
    fn recognize(&self, image: &DynamicImage, config: &OcrConfig) -> Result<OcrOutput, OcrError>;
}
