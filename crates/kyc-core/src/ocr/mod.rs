//! OCR capability: image in, raw text out.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use image::DynamicImage;

use crate::error::OcrError;

/// Trait that all OCR engines must implement.
pub trait TextRecognizer: Send + Sync {
    /// Engine identifier reported by the health endpoint.
    fn name(&self) -> &'static str;

    /// Recognize the text of an image, one detected line per text line.
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// Recognizer used when no OCR models are configured. Every call fails.
#[derive(Debug, Clone)]
pub struct DisabledRecognizer {
    reason: String,
}

impl DisabledRecognizer {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl TextRecognizer for DisabledRecognizer {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn recognize(&self, _image: &DynamicImage) -> Result<String, OcrError> {
        Err(OcrError::Unavailable(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_recognizer_fails() {
        let ocr = DisabledRecognizer::new("no model directory configured");
        let err = ocr.recognize(&DynamicImage::new_rgb8(2, 2)).unwrap_err();

        assert_eq!(ocr.name(), "disabled");
        assert_eq!(
            err.to_string(),
            "OCR engine unavailable: no model directory configured"
        );
    }
}
